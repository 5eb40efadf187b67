mod common;

use common::Fixture;
use fileserve::{Resolution, Resolver};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "..",
        ".",
        "",
        "%2e%2e",
        "%2E%2e",
        ".%2e",
        "%2f",
        "..%2f",
        "%5c..",
        "%00",
        "sub",
        "bare",
        "hello.txt",
        "secret.txt",
        "static",
        "index.html",
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_resolution_never_leaves_root(segments in prop::collection::vec(segment(), 0..8)) {
        let fx = Fixture::new();
        let resolver = Resolver::new(fx.root());
        let root = fx.root().canonicalize().unwrap();
        let request_path = format!("/{}", segments.join("/"));

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let resolution = runtime.block_on(resolver.resolve(&request_path));

        match resolution {
            Resolution::RegularFile(file) => {
                prop_assert!(file.path.starts_with(&root), "{request_path} -> {:?}", file.path);
                prop_assert_ne!(file.path.file_name().unwrap(), "secret.txt");
            }
            Resolution::Directory(dir) => {
                prop_assert!(dir.starts_with(&root), "{request_path} -> {dir:?}");
            }
            Resolution::NotFound | Resolution::Forbidden => {}
        }
    }
}
