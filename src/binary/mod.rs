//! Binary persistence: a tagged, length-prefixed document format

use crate::error::{ConfigError, Result};
use crate::model::{Comment, Section, Setting};
use std::io::{Read, Write};

const MAGIC: [u8; 4] = *b"CFGB";
const VERSION: u8 = 1;

// Sanity caps so corrupt length fields fail cleanly instead of triggering
// huge allocations.
const MAX_STRING_LEN: u32 = 16 * 1024 * 1024;
const MAX_COUNT: u32 = 1024 * 1024;

/// Write a document's sections in the binary format.
pub fn write_document(writer: &mut impl Write, sections: &[Section]) -> Result<()> {
    writer.write_all(&MAGIC)?;
    writer.write_all(&[VERSION])?;

    write_u32(writer, count_of(sections.len(), "sections")?)?;
    for section in sections {
        write_string(writer, section.name())?;
        write_comment_opt(writer, section.comment())?;
        write_comments(writer, section.pre_comments())?;

        write_u32(writer, count_of(section.len(), "settings")?)?;
        for setting in section.iter() {
            write_string(writer, setting.name())?;
            write_string(writer, setting.raw_value())?;
            write_comment_opt(writer, setting.comment())?;
            write_comments(writer, setting.pre_comments())?;
        }
    }
    Ok(())
}

/// Read a document's sections from the binary format.
pub fn read_document(reader: &mut impl Read) -> Result<Vec<Section>> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ConfigError::binary("bad magic number"));
    }

    let version = read_u8(reader)?;
    if version != VERSION {
        return Err(ConfigError::binary(format!(
            "unsupported format version {}",
            version
        )));
    }

    let section_count = read_count(reader, "sections")?;
    let mut sections = Vec::with_capacity(section_count as usize);
    for _ in 0..section_count {
        let mut section = Section::new(read_string(reader)?);
        section.set_comment(read_comment_opt(reader)?);
        section.set_pre_comments(read_comments(reader)?);

        let setting_count = read_count(reader, "settings")?;
        for _ in 0..setting_count {
            let name = read_string(reader)?;
            let raw_value = read_string(reader)?;
            let mut setting = Setting::with_raw_value(name, raw_value);
            setting.set_comment(read_comment_opt(reader)?);
            setting.set_pre_comments(read_comments(reader)?);
            section.add(setting);
        }
        sections.push(section);
    }
    Ok(sections)
}

fn count_of(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len)
        .ok()
        .filter(|&count| count <= MAX_COUNT)
        .ok_or_else(|| ConfigError::binary(format!("too many {} to serialize", what)))
}

fn write_u32(writer: &mut impl Write, value: u32) -> Result<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn write_string(writer: &mut impl Write, text: &str) -> Result<()> {
    let len = u32::try_from(text.len())
        .ok()
        .filter(|&len| len <= MAX_STRING_LEN)
        .ok_or_else(|| ConfigError::binary("string too long to serialize"))?;
    write_u32(writer, len)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

fn write_comment_opt(writer: &mut impl Write, comment: Option<&Comment>) -> Result<()> {
    match comment {
        Some(comment) => {
            writer.write_all(&[1])?;
            write_u32(writer, comment.symbol() as u32)?;
            write_string(writer, comment.text())
        }
        None => {
            writer.write_all(&[0])?;
            Ok(())
        }
    }
}

fn write_comments(writer: &mut impl Write, comments: &[Comment]) -> Result<()> {
    write_u32(writer, count_of(comments.len(), "comments")?)?;
    for comment in comments {
        write_u32(writer, comment.symbol() as u32)?;
        write_string(writer, comment.text())?;
    }
    Ok(())
}

fn read_u8(reader: &mut impl Read) -> Result<u8> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    Ok(byte[0])
}

fn read_u32(reader: &mut impl Read) -> Result<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

fn read_count(reader: &mut impl Read, what: &str) -> Result<u32> {
    let count = read_u32(reader)?;
    if count > MAX_COUNT {
        return Err(ConfigError::binary(format!(
            "implausible {} count {}",
            what, count
        )));
    }
    Ok(count)
}

fn read_string(reader: &mut impl Read) -> Result<String> {
    let len = read_u32(reader)?;
    if len > MAX_STRING_LEN {
        return Err(ConfigError::binary(format!(
            "implausible string length {}",
            len
        )));
    }
    let mut bytes = vec![0u8; len as usize];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| ConfigError::binary(format!("invalid UTF-8 string: {}", e)))
}

fn read_char(reader: &mut impl Read) -> Result<char> {
    let code_point = read_u32(reader)?;
    char::from_u32(code_point)
        .ok_or_else(|| ConfigError::binary(format!("invalid character code point {}", code_point)))
}

fn read_comment_opt(reader: &mut impl Read) -> Result<Option<Comment>> {
    match read_u8(reader)? {
        0 => Ok(None),
        1 => {
            let symbol = read_char(reader)?;
            let text = read_string(reader)?;
            Ok(Some(Comment::new(symbol, text)))
        }
        flag => Err(ConfigError::binary(format!(
            "invalid comment flag {}",
            flag
        ))),
    }
}

fn read_comments(reader: &mut impl Read) -> Result<Vec<Comment>> {
    let count = read_count(reader, "comments")?;
    let mut comments = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let symbol = read_char(reader)?;
        let text = read_string(reader)?;
        comments.push(Comment::new(symbol, text));
    }
    Ok(comments)
}
