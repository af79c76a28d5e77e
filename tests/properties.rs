use std::collections::BTreeSet;

use tempdir::TempDir;
use vfs_local::{Adapter, Error, LocalFS, utils};

fn setup_test_env() -> TempDir {
    TempDir::new("vfs_local_props").unwrap()
}

#[test]
fn compute_key_is_left_inverse_of_compute_path() -> anyhow::Result<()> {
    let temp_dir = setup_test_env();
    let fs = LocalFS::new(temp_dir.path(), false)?;

    let keys = [
        "",
        "file",
        "dir/file.txt",
        "dir//file.txt",
        "./dir/./file.txt",
        "dir/sub/../file.txt",
        "dir/",
        "/absolute/looking",
        "with space/and-dash_underscore.tar.gz",
    ];
    for key in keys {
        let path = fs.compute_path(key)?;
        assert!(path.starts_with(fs.root()), "{key:?} resolved to {path:?}");
        assert_eq!(fs.compute_key(&path)?, utils::normalize_key(key), "key {key:?}");
    }
    Ok(())
}

#[test]
fn escaping_keys_are_boundary_errors() -> anyhow::Result<()> {
    let temp_dir = setup_test_env();
    let fs = LocalFS::new(temp_dir.path().join("data"), true)?;

    let escapes = ["..", "../", "../../etc/passwd", "a/../..", "../data2/file", "./../x"];
    for key in escapes {
        assert!(
            matches!(fs.compute_path(key), Err(Error::Boundary { .. })),
            "{key:?} must not resolve"
        );
        assert!(matches!(fs.read(key), Err(Error::Boundary { .. })));
        assert!(matches!(fs.write(key, b"x"), Err(Error::Boundary { .. })));
        assert!(matches!(fs.exists(key), Err(Error::Boundary { .. })));
        assert!(matches!(fs.delete(key), Err(Error::Boundary { .. })));
    }
    assert!(!temp_dir.path().join("data2").exists());
    Ok(())
}

#[test]
fn sibling_with_common_string_prefix_is_outside() -> anyhow::Result<()> {
    let temp_dir = setup_test_env();
    let fs = LocalFS::new(temp_dir.path().join("data"), true)?;
    let sibling = temp_dir.path().join("data2");
    std::fs::create_dir_all(&sibling)?;

    assert!(fs.compute_key(sibling.join("file")).unwrap_err().is_boundary());
    Ok(())
}

#[test]
fn write_read_roundtrip_arbitrary_bytes() -> anyhow::Result<()> {
    let temp_dir = setup_test_env();
    let fs = LocalFS::new(temp_dir.path(), false)?;

    let all_bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let samples: [&[u8]; 4] = [b"", b"\0", b"text\0with\0nuls", &all_bytes];
    for (i, content) in samples.iter().enumerate() {
        let key = format!("samples/{i}.bin");
        assert_eq!(fs.write(&key, content)?, content.len());
        assert_eq!(fs.read(&key)?, *content);
    }
    Ok(())
}

#[test]
fn exists_tracks_write_and_delete() -> anyhow::Result<()> {
    let temp_dir = setup_test_env();
    let fs = LocalFS::new(temp_dir.path(), false)?;

    assert!(!fs.exists("x/y/z")?);
    fs.write("x/y/z", b"1")?;
    assert!(fs.exists("x/y/z")?);
    fs.delete("x/y/z")?;
    assert!(!fs.exists("x/y/z")?);
    assert!(fs.exists("x/y")?);
    Ok(())
}

#[test]
fn delete_of_nonexistent_key_succeeds() -> anyhow::Result<()> {
    let temp_dir = setup_test_env();
    let fs = LocalFS::new(temp_dir.path(), false)?;
    fs.delete("never/written")?;
    Ok(())
}

#[test]
fn keys_and_delete_on_a_subtree() -> anyhow::Result<()> {
    let temp_dir = setup_test_env();
    let fs = LocalFS::new(temp_dir.path(), false)?;
    fs.write("a/b/c.txt", b"c")?;
    fs.write("a/d.txt", b"d")?;

    let keys: BTreeSet<String> = fs.keys("a")?.into_iter().collect();
    let expected: BTreeSet<String> = ["a/b", "a/b/c.txt", "a/d.txt"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(keys, expected);

    fs.delete("a")?;
    assert!(!fs.exists("a")?);
    Ok(())
}

#[test]
fn create_directory_twice_fails() -> anyhow::Result<()> {
    let temp_dir = setup_test_env();
    let fs = LocalFS::new(temp_dir.path(), false)?;

    fs.create_directory("dir")?;
    assert!(matches!(fs.create_directory("dir"), Err(Error::AlreadyExists(_))));
    Ok(())
}

#[test]
fn adapter_trait_object_is_usable() -> anyhow::Result<()> {
    let temp_dir = setup_test_env();
    let fs: Box<dyn Adapter> = Box::new(LocalFS::new(temp_dir.path(), false)?);

    fs.write("k", b"v")?;
    fs.copy("k", "k2")?;
    fs.rename("k2", "moved/k3")?;

    assert_eq!(fs.read("moved/k3")?, b"v");
    assert_eq!(fs.size("k")?, 1);
    assert!(fs.is_directory("moved")?);
    assert_eq!(fs.keys("")?, vec!["k", "moved", "moved/k3"]);
    Ok(())
}
