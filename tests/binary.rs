use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);

fn fileserve() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fileserve"))
}

struct KillOnDrop(Child);

impl Drop for KillOnDrop {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

/// Wait for the first stdout line that contains `needle`
fn wait_for_line(child: &mut Child, needle: &'static str) -> Option<String> {
    let stdout = child.stdout.take()?;
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(stdout).lines().map_while(Result::ok) {
            if line.contains(needle) {
                let _ = tx.send(line);
                return;
            }
        }
    });
    rx.recv_timeout(STARTUP_TIMEOUT).ok()
}

#[test]
fn test_startup_line() {
    let tmp = tempfile::tempdir().unwrap();
    let child = fileserve()
        .args(["--listen-addr", "127.0.0.1:0", "--root"])
        .arg(tmp.path())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let mut child = KillOnDrop(child);

    let line = wait_for_line(&mut child.0, "Listening on").expect("no startup line");
    assert!(line.contains("127.0.0.1:"), "{line}");
    assert!(line.contains(&tmp.path().display().to_string()), "{line}");
}

#[test]
fn test_port_only_listen_addr_picks_a_port() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("hello.txt"), "hi").unwrap();
    let child = fileserve()
        .args(["--listen-addr", ":0", "--root"])
        .arg(tmp.path())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let mut child = KillOnDrop(child);

    let line = wait_for_line(&mut child.0, "Listening on").expect("no startup line");
    let addr: SocketAddr = line
        .strip_prefix("Listening on ")
        .and_then(|rest| rest.split_once(", serving"))
        .map(|(addr, _)| addr)
        .and_then(|addr| addr.parse().ok())
        .unwrap_or_else(|| panic!("no address in {line:?}"));
    assert!(addr.ip().is_unspecified(), "{line}");
    assert_ne!(addr.port(), 0, "{line}");

    let mut stream = TcpStream::connect((Ipv4Addr::LOCALHOST, addr.port())).unwrap();
    stream
        .write_all(b"GET /hello.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .unwrap();
    let mut reply = String::new();
    stream.read_to_string(&mut reply).unwrap();
    assert!(reply.starts_with("HTTP/1.1 200 OK"), "{reply}");
    assert!(reply.ends_with("\r\n\r\nhi"), "{reply}");
}

#[test]
fn test_port_in_use_exits_nonzero() {
    let taken = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = taken.local_addr().unwrap();
    let tmp = tempfile::tempdir().unwrap();

    let output = fileserve()
        .args(["--listen-addr", &addr.to_string(), "--root"])
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_invalid_listen_addr_exits_nonzero() {
    let output = fileserve()
        .args(["--listen-addr", "not-an-address"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_missing_config_file_exits_nonzero() {
    let tmp = tempfile::tempdir().unwrap();
    let output = fileserve()
        .arg("--config")
        .arg(tmp.path().join("nope.toml"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}
