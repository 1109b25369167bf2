use std::io::{BufReader, Cursor};
use std::path::Path;

use exif::{In, Tag, Value};

use crate::error::Result;

/// Character-code prefix of an ASCII `UserComment`.
const USER_COMMENT_ASCII: &[u8; 8] = b"ASCII\0\0\0";

/// Read the embedded caption of an image file.
/// Returns `Ok(None)` when the file has no EXIF block or no caption in it.
pub fn read_caption(path: &Path) -> Result<Option<String>> {
    let file = std::fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => Ok(caption_from_exif(&exif)),
        Err(exif::Error::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Same as [`read_caption`] for an in-memory image.
pub fn caption_from_bytes(data: &[u8]) -> Result<Option<String>> {
    match exif::Reader::new().read_from_container(&mut Cursor::new(data)) {
        Ok(exif) => Ok(caption_from_exif(&exif)),
        Err(exif::Error::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// `ImageDescription` first, then an ASCII `UserComment`. Blank values count as absent.
fn caption_from_exif(exif: &exif::Exif) -> Option<String> {
    exif.get_field(Tag::ImageDescription, In::PRIMARY)
        .and_then(|f| ascii_text(&f.value))
        .or_else(|| {
            exif.get_field(Tag::UserComment, In::PRIMARY)
                .and_then(|f| user_comment_text(&f.value))
        })
}

fn ascii_text(value: &Value) -> Option<String> {
    let Value::Ascii(parts) = value else {
        return None;
    };
    parts
        .iter()
        .map(|p| String::from_utf8_lossy(p).trim().to_string())
        .find(|s| !s.is_empty())
}

fn user_comment_text(value: &Value) -> Option<String> {
    let Value::Undefined(bytes, _) = value else {
        return None;
    };
    let text = bytes.strip_prefix(USER_COMMENT_ASCII.as_slice())?;
    let text = String::from_utf8_lossy(text)
        .trim_end_matches('\0')
        .trim()
        .to_string();
    (!text.is_empty()).then_some(text)
}
