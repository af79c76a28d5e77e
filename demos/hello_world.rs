use vfs_local::{Adapter, LocalFS};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let tmp = std::env::temp_dir();
    println!("Temp dir: {}", tmp.display());

    // creates `/tmp/my_vfs` on host if it is missing
    let fs = LocalFS::new(tmp.join("my_vfs"), true)?;

    // parent directory `docs` is created on demand
    fs.write("docs/first.txt", b"Hello")?;
    fs.write("second.txt", b"World")?;
    assert!(fs.exists("docs/first.txt")?);

    // keys are normalized before they are resolved
    let first_content = fs.read("docs/../docs/./first.txt")?;
    let second_content = fs.read("/second.txt")?;

    println!(
        "{}, {}!",
        String::from_utf8_lossy(&first_content),
        String::from_utf8_lossy(&second_content)
    );
    println!("keys: {:?}", fs.keys("")?);
    println!("checksum of second.txt: {}", fs.checksum("second.txt")?);

    // anything resolving outside the root is refused
    match fs.read("../../etc/passwd") {
        Err(e) if e.is_boundary() => println!("refused: {e}"),
        other => println!("unexpected: {other:?}"),
    }

    // removes the whole tree, including the root directory itself
    fs.delete("")?;
    Ok(())
}
