//! CHAT header metadata.
//!
//! The header section declares the session's speakers and recording
//! metadata. `@Participants` introduces every speaker with code, name and
//! role; `@ID` repeats each speaker with the full pipe-separated field list
//! (language, corpus, code, age, sex, group, SES, role, education, custom);
//! `@Birth of CODE` attaches a birth date. A role from `@Participants` is
//! never overwritten by the `@ID` role field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::chat::lines::{lines, LineKind};

static PARTICIPANT_SEP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*").unwrap());

/// One `@Participants`/`@ID` entry, fields as transcribed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Participant {
    pub code: String,
    pub name: String,
    pub role: String,
    pub age: String,
    pub sex: String,
    pub language: String,
    pub group: String,
    pub ses: String,
    pub education: String,
    pub custom: String,
    pub corpus: String,
    pub birth_date: String,
}

/// Parsed header section of one CHAT file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionMeta {
    pub date: String,
    pub pid: String,
    pub media_filename: String,
    pub media_format: String,
    pub media_comment: String,
    pub participants: Vec<Participant>,
}

impl SessionMeta {
    fn participant_mut(&mut self, code: &str) -> &mut Participant {
        if let Some(at) = self.participants.iter().position(|p| p.code == code) {
            return &mut self.participants[at];
        }
        self.participants.push(Participant {
            code: code.to_string(),
            ..Default::default()
        });
        let last = self.participants.len() - 1;
        &mut self.participants[last]
    }
}

/// Parses the header section of a session (the text before the first
/// record), which must already have its continuation lines joined.
pub fn parse_headers(header_text: &str) -> SessionMeta {
    let mut meta = SessionMeta::default();

    for line in lines(header_text) {
        if line.kind != LineKind::Header {
            continue;
        }
        let Some((key, content)) = line.text.split_once(":\t") else {
            continue;
        };
        let key = key.trim_start_matches('@');

        if key == "Participants" {
            add_participants(&mut meta, content);
        } else if key == "ID" {
            add_id_fields(&mut meta, content);
        } else if key == "Media" {
            add_media_fields(&mut meta, content);
        } else if let Some(code) = key.strip_prefix("Birth of ") {
            meta.participant_mut(code).birth_date = content.to_string();
        } else if key == "Date" {
            meta.date = content.to_string();
        } else if key == "PID" {
            meta.pid = content.to_string();
        }
    }
    meta
}

/// `@Participants`: comma-separated `CODE Name Role` entries; a two-field
/// entry omits the name, a one-field entry is just the code.
fn add_participants(meta: &mut SessionMeta, content: &str) {
    for entry in PARTICIPANT_SEP_REGEX.split(content) {
        let fields: Vec<&str> = entry.split_whitespace().collect();
        let (code, name, role) = match fields.as_slice() {
            [] => continue,
            [code] => (*code, "", ""),
            [code, role] => (*code, "", *role),
            [code, name, role, ..] => (*code, *name, *role),
        };
        let participant = meta.participant_mut(code);
        participant.name = name.to_string();
        participant.role = role.to_string();
    }
}

/// `@ID`: `language|corpus|code|age|sex|group|SES|role|education|custom|`.
fn add_id_fields(meta: &mut SessionMeta, content: &str) {
    let content = content.strip_suffix('|').unwrap_or(content);
    let fields: Vec<&str> = content.split('|').collect();
    let field = |at: usize| fields.get(at).copied().unwrap_or("").to_string();

    let participant = meta.participant_mut(&field(2));
    participant.language = field(0);
    participant.corpus = field(1);
    participant.age = field(3);
    participant.sex = field(4);
    participant.group = field(5);
    participant.ses = field(6);
    // a role from @Participants is never overwritten
    if participant.role.is_empty() {
        participant.role = field(7);
    }
    participant.education = field(8);
    participant.custom = field(9);
}

/// `@Media`: `filename, format` with an optional trailing comment.
fn add_media_fields(meta: &mut SessionMeta, content: &str) {
    let fields: Vec<&str> = content.split(", ").collect();
    meta.media_filename = fields.first().copied().unwrap_or("").to_string();
    meta.media_format = fields.get(1).copied().unwrap_or("").to_string();
    meta.media_comment = fields.get(2).copied().unwrap_or("").to_string();
}
