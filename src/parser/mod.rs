//! Line-oriented, comment-aware parser for the text format

use crate::error::{ConfigError, Result};
use crate::model::{Comment, Options, Section, Setting};

/// Result of scanning a line for its comment.
///
/// `index` is the byte offset of the delimiter that ended the scan. It can
/// be set while `comment` is `None`: a backslash-escaped delimiter yields no
/// comment but still marks where the line text ends for stripping purposes.
struct CommentScan {
    comment: Option<Comment>,
    index: Option<usize>,
}

/// Parses a document source into its sections.
///
/// Parsing is single-pass and fails fast on the first structural error,
/// reporting the 1-based line number. Conversion of values is not attempted
/// here; settings store their raw string values only.
pub fn parse(source: &str, options: &Options) -> Result<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<usize> = None;
    let mut pre_comments: Vec<Comment> = Vec::new();

    for (line_index, raw_line) in source.lines().enumerate() {
        let line_number = line_index + 1;
        let mut line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let scan = scan_comment(line, options.comment_delimiters());

        if options.parse_pre_comments() && scan.index == Some(0) {
            // A comment-only line; attach it to the next entity.
            if let Some(comment) = scan.comment {
                pre_comments.push(comment);
            }
            continue;
        } else if options.parse_inline_comments() {
            if let Some(index) = scan.index {
                if index > 0 {
                    line = line[..index].trim();
                }
            }
        }

        if line.starts_with('[') {
            let mut section = parse_section(line, line_number)?;
            if options.parse_inline_comments() {
                section.set_comment(scan.comment);
            }
            if options.parse_pre_comments() && !pre_comments.is_empty() {
                section.set_pre_comments(std::mem::take(&mut pre_comments));
            }
            sections.push(section);
            current = Some(sections.len() - 1);
        } else {
            let mut setting = parse_setting(line, line_number)?;
            if options.parse_inline_comments() {
                setting.set_comment(scan.comment);
            }
            let section_index = match current {
                Some(index) => index,
                None => {
                    return Err(ConfigError::SettingOutsideSection {
                        name: setting.name().to_string(),
                        line: line_number,
                    })
                }
            };
            if options.parse_pre_comments() && !pre_comments.is_empty() {
                setting.set_pre_comments(std::mem::take(&mut pre_comments));
            }
            sections[section_index].add(setting);
        }
    }

    Ok(sections)
}

/// Finds the first comment delimiter that is neither backslash-escaped nor
/// inside quote marks.
///
/// The quote check is an approximation, not a tokenizer: a delimiter counts
/// as quoted when any quote mark appears to its left and a quote mark at an
/// absolute offset above zero appears at or after it. A delimiter directly
/// preceded by a backslash aborts the whole scan; the line then has no
/// comment at all, even if another delimiter follows.
fn scan_comment(line: &str, delimiters: &[char]) -> CommentScan {
    let mut from = 0;
    loop {
        let found = line[from..]
            .char_indices()
            .find(|(_, c)| delimiters.contains(c))
            .map(|(offset, c)| (from + offset, c));
        let (index, symbol) = match found {
            Some(pair) => pair,
            None => {
                return CommentScan {
                    comment: None,
                    index: None,
                }
            }
        };

        if index >= 1 && line[..index].ends_with('\\') {
            return CommentScan {
                comment: None,
                index: Some(index),
            };
        }

        if is_in_quote_marks(line, index) {
            from = index + symbol.len_utf8();
            continue;
        }

        let text = line[index + symbol.len_utf8()..].trim().to_string();
        return CommentScan {
            comment: Some(Comment::new(symbol, text)),
            index: Some(index),
        };
    }
}

fn is_in_quote_marks(line: &str, index: usize) -> bool {
    let left = line[..index].contains('"');
    let right = match line[index..].find('"') {
        Some(offset) => index + offset > 0,
        None => false,
    };
    left && right
}

fn parse_section(line: &str, line_number: usize) -> Result<Section> {
    let closing = match line.find(']') {
        Some(index) => index,
        None => return Err(ConfigError::ClosingBracketMissing { line: line_number }),
    };

    let trailing = &line[closing + 1..];
    if !trailing.is_empty() {
        return Err(ConfigError::UnexpectedToken {
            token: trailing.to_string(),
            line: line_number,
        });
    }

    let name = line[1..closing].trim();
    Ok(Section::new(name))
}

fn parse_setting(line: &str, line_number: usize) -> Result<Setting> {
    let assign = match line.find('=') {
        Some(index) => index,
        None => return Err(ConfigError::AssignmentExpected { line: line_number }),
    };

    let name = line[..assign].trim();
    if name.is_empty() {
        return Err(ConfigError::NameExpected { line: line_number });
    }

    let value = line[assign + 1..].trim();
    Ok(Setting::with_raw_value(name, value))
}
