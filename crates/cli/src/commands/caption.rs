use std::path::Path;

use anyhow::Result;
use lightfolio_core::{exif, gate};

pub fn caption(path: &Path) -> Result<()> {
    match exif::read_caption(path)? {
        Some(text) => println!("{text}"),
        None => println!("No embedded caption in {}", path.display()),
    }
    Ok(())
}

pub fn digest(password: &str) -> Result<()> {
    println!("{}", gate::password_digest(password));
    Ok(())
}
