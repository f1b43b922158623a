//! Integration tests for Modcache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use sha2::{Digest, Sha256};
    use tempfile::TempDir;

    fn modcache() -> Command {
        let mut cmd = cargo_bin_cmd!("modcache");
        // Keep the user's real config and cache dir out of the tests.
        cmd.env("MODCACHE_CONFIG", "/nonexistent/modcache-config.toml");
        cmd.env_remove("MODCACHE_DIR");
        cmd
    }

    #[test]
    fn help_displays() {
        modcache()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "persistent HTTP cache for module resolution",
            ));
    }

    #[test]
    fn version_displays() {
        modcache()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("modcache"));
    }

    #[test]
    fn set_then_get_roundtrip() {
        let root = TempDir::new().unwrap();
        let root = root.path().to_str().unwrap();
        let url = "https://deno.land/x/mod.ts";

        modcache()
            .args(["--root", root, "set", url])
            .args(["--header", "content-type=application/typescript"])
            .write_stdin("export {};")
            .assert()
            .success();

        modcache()
            .args(["--root", root, "get", url])
            .assert()
            .success()
            .stdout("export {};");
    }

    #[test]
    fn headers_roundtrip() {
        let root = TempDir::new().unwrap();
        let root = root.path().to_str().unwrap();
        let url = "https://deno.land/x/mod.ts";

        modcache()
            .args(["--root", root, "set", url])
            .args(["--header", "etag=\"abc123\""])
            .write_stdin("body")
            .assert()
            .success();

        modcache()
            .args(["--root", root, "headers", url])
            .assert()
            .success()
            .stdout(predicate::str::contains("etag").and(predicate::str::contains("abc123")));
    }

    #[test]
    fn get_miss_fails() {
        let root = TempDir::new().unwrap();

        modcache()
            .args(["--root", root.path().to_str().unwrap()])
            .args(["get", "https://deno.land/x/never_cached.ts"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not cached"));
    }

    #[test]
    fn checksum_mismatch_is_a_miss() {
        let root = TempDir::new().unwrap();
        let root = root.path().to_str().unwrap();
        let url = "https://deno.land/x/mod.ts";

        modcache()
            .args(["--root", root, "set", url])
            .write_stdin("content")
            .assert()
            .success();

        let wrong = hex::encode(Sha256::digest(b"other content"));
        modcache()
            .args(["--root", root, "get", url, "--checksum", &wrong])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not cached"));

        let right = hex::encode(Sha256::digest(b"content"));
        modcache()
            .args(["--root", root, "get", url, "--checksum", &right])
            .assert()
            .success()
            .stdout("content");
    }

    #[test]
    fn read_only_set_is_dropped() {
        let root = TempDir::new().unwrap();
        let root = root.path().to_str().unwrap();
        let url = "https://deno.land/x/mod.ts";

        modcache()
            .args(["--root", root, "--read-only", "set", url])
            .write_stdin("dropped")
            .assert()
            .success();

        modcache()
            .args(["--root", root, "get", url])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not cached"));
    }

    #[test]
    fn path_is_deterministic() {
        let root = TempDir::new().unwrap();
        let root = root.path().to_str().unwrap();
        let url = "https://deno.land/x/mod.ts";

        let first = modcache()
            .args(["--root", root, "path", url])
            .output()
            .unwrap();
        let second = modcache()
            .args(["--root", root, "path", url])
            .output()
            .unwrap();

        assert!(first.status.success());
        assert_eq!(first.stdout, second.stdout);

        let printed = String::from_utf8(first.stdout).unwrap();
        assert!(printed.starts_with(root));
        assert!(printed.contains("https"));
        assert!(printed.contains("deno.land"));
    }

    #[test]
    fn vendor_mode_promotes_from_global() {
        let global = TempDir::new().unwrap();
        let vendor = TempDir::new().unwrap();
        let global = global.path().to_str().unwrap();
        let vendor = vendor.path().to_str().unwrap();
        let url = "https://deno.land/x/mod.ts";

        modcache()
            .args(["--root", global, "set", url])
            .write_stdin("from global")
            .assert()
            .success();

        modcache()
            .args(["--root", global, "--vendor-root", vendor, "get", url])
            .assert()
            .success()
            .stdout("from global");

        // Promotion copied the entry: the vendor dir now serves it on its own.
        modcache()
            .args(["--root", vendor, "get", url])
            .assert()
            .success()
            .stdout("from global");
    }

    #[test]
    fn invalid_url_fails() {
        let root = TempDir::new().unwrap();

        modcache()
            .args(["--root", root.path().to_str().unwrap()])
            .args(["get", "not a url"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid URL"));
    }
}
