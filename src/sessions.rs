//! Walking one transcript file into a [`Session`].
//!
//! [`SessionCursor`] is the crate's entry point. It owns the record source
//! for one file (CHAT text with its record spans, or a memory-mapped
//! Toolbox database), hands out [`Record`]s one at a time and assembles
//! each into an [`Utterance`] under the [`CorpusProfile`] in effect.
//!
//! Assembly runs the same way for both formats: annotation fields off the
//! [`FormatReader`], then the word list, then the morpheme groups with
//! their two-stage cross-tier alignment, then the word/morpheme linkage.
//! A record never fails to assemble; whatever cannot be aligned is blanked
//! and recorded as a [`Warning`] on the utterance or on the word the
//! mismatch belongs to.

use std::fmt;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::Path;

use crate::aligning::{self, MorphemeArena, TierUnits};
use crate::chat::{self, Participant};
use crate::cleaning;
use crate::corpora::{CorpusProfile, StandardForm, TierCleanStep, TranscriptFormat};
use crate::model::{MorphemeKind, Record, Session, Speaker, Utterance, Word};
use crate::reading::{ChatAnnotations, FormatReader, ToolboxAnnotations};
use crate::segmenting;
use crate::toolbox::{self, ToolboxError, ToolboxFile};
use crate::warning::{MorphTier, Warning};

/// Failure to open a session file.
#[derive(Debug)]
pub enum SessionError {
    /// The file could not be read.
    Io(io::Error),
    /// The Toolbox database could not be opened.
    Toolbox(ToolboxError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(err) => write!(f, "cannot read session file: {}", err),
            SessionError::Toolbox(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io(err) => Some(err),
            SessionError::Toolbox(err) => Some(err),
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> SessionError {
        SessionError::Io(err)
    }
}

impl From<ToolboxError> for SessionError {
    fn from(err: ToolboxError) -> SessionError {
        SessionError::Toolbox(err)
    }
}

/// The record source behind a cursor.
#[derive(Debug)]
enum Source {
    /// Session text with continuation lines already joined, plus the byte
    /// span of every record in it.
    Chat {
        text: String,
        spans: Vec<Range<usize>>,
    },
    /// Memory-mapped Toolbox database.
    Toolbox(ToolboxFile),
}

/// Cursor over the records of one transcript file.
///
/// [`SessionCursor::parse`] consumes the whole file into a [`Session`];
/// iterating the cursor yields one assembled [`Utterance`] per record for
/// callers that stream instead.
#[derive(Debug)]
pub struct SessionCursor<'p> {
    profile: &'p CorpusProfile,
    source_id: String,
    source: Source,
    at: usize,
}

impl<'p> SessionCursor<'p> {
    /// Opens a transcript file. The profile decides the format: CHAT files
    /// are read whole with their continuation lines joined up front,
    /// Toolbox files are memory-mapped.
    pub fn open(
        path: impl AsRef<Path>,
        profile: &'p CorpusProfile,
    ) -> Result<SessionCursor<'p>, SessionError> {
        let path = path.as_ref();
        let source = match profile.format {
            TranscriptFormat::Chat => chat_source(&fs::read_to_string(path)?),
            TranscriptFormat::Toolbox => {
                Source::Toolbox(ToolboxFile::open(path, &profile.record_marker)?)
            }
        };
        Ok(SessionCursor {
            profile,
            source_id: file_stem(path),
            source,
            at: 0,
        })
    }

    /// Builds a cursor over in-memory transcript text with a caller-chosen
    /// session id.
    pub fn from_text(
        text: &str,
        source_id: &str,
        profile: &'p CorpusProfile,
    ) -> Result<SessionCursor<'p>, SessionError> {
        let source = match profile.format {
            TranscriptFormat::Chat => chat_source(text),
            TranscriptFormat::Toolbox => Source::Toolbox(ToolboxFile::from_bytes(
                text.as_bytes().to_vec(),
                &profile.record_marker,
            )?),
        };
        Ok(SessionCursor {
            profile,
            source_id: source_id.to_string(),
            source,
            at: 0,
        })
    }

    /// Number of records in the source, metadata records included.
    pub fn record_count(&self) -> usize {
        match &self.source {
            Source::Chat { spans, .. } => spans.len(),
            Source::Toolbox(file) => file.len(),
        }
    }

    /// Raw text of the record at `at`.
    pub fn record_text(&self, at: usize) -> Option<String> {
        match &self.source {
            Source::Chat { text, spans } => {
                let span = spans.get(at)?;
                Some(text[span.clone()].trim_end_matches('\n').to_string())
            }
            Source::Toolbox(file) => file.record_text(at),
        }
    }

    /// Parses the next record, skipping CHAT chunks without a well-formed
    /// main line and Toolbox metadata records.
    pub fn next_record(&mut self) -> Option<Record> {
        loop {
            let at = self.at;
            let text = self.record_text(at)?;
            self.at += 1;
            match &self.source {
                Source::Chat { .. } => match chat::parse_record(&text, at) {
                    Some(record) => return Some(record),
                    None => tracing::warn!(uid = at, "skipping record without a main line"),
                },
                Source::Toolbox(_) => {
                    let record = toolbox::parse_record(&text, at);
                    if toolbox::is_record(&record) {
                        return Some(record);
                    }
                    tracing::debug!(uid = at, "skipping metadata record");
                }
            }
        }
    }

    /// Assembles the full utterance of one record: annotation fields, the
    /// word list, the morpheme groups and their alignment.
    pub fn utterance(&self, record: &Record) -> Utterance {
        match self.profile.format {
            TranscriptFormat::Chat => self.chat_utterance(record),
            TranscriptFormat::Toolbox => self.toolbox_utterance(record),
        }
    }

    /// Parses the whole remaining file: header metadata once, then every
    /// record through the cursor.
    pub fn parse(mut self) -> Session {
        let mut session = Session::new(self.source_id.clone());
        if let Source::Chat { text, .. } = &self.source {
            let meta = chat::parse_headers(chat::header_section(text));
            session.date = cleaning::clean_date(&meta.date);
            session.media_filename = meta.media_filename;
            session.speakers = meta.participants.iter().map(speaker_from).collect();
        }
        while let Some(record) = self.next_record() {
            let utterance = self.utterance(&record);
            session.utterances.push(utterance);
        }
        session
    }

    /// The annotation fields both formats share, straight off the reader.
    /// Morphology tiers are stored raw; cleaning happens when the morphemes
    /// are built.
    fn annotated(&self, reader: &dyn FormatReader) -> Utterance {
        Utterance {
            speaker_label: reader.speaker_label(),
            addressee: reader.addressee(),
            utterance_raw: reader.utterance(),
            translation: reader.translation(),
            comment: reader.comment(),
            sentence_type: reader.sentence_type().to_string(),
            start: reader.start_time(),
            end: reader.end_time(),
            seg_tier: reader.seg_tier(),
            gloss_tier: reader.gloss_tier(),
            pos_tier: reader.pos_tier(),
            ..Utterance::default()
        }
    }

    fn chat_utterance(&self, record: &Record) -> Utterance {
        let reader = ChatAnnotations::new(record, self.profile);
        let mut utterance = self.annotated(&reader);
        utterance.source_id = format!("{}_{}", self.source_id, record.uid);
        utterance.actual = cleaning::clean_utterance(&reader.actual_utterance());
        utterance.target = cleaning::clean_utterance(&reader.target_utterance());
        self.add_chat_words(&mut utterance);
        self.add_morphemes(&mut utterance, &reader);
        utterance
    }

    /// One [`Word`] per actual/target pair. The word language is read off
    /// the uncleaned standard form; the language suffix that codes it is
    /// itself removed by the word cleaners.
    fn add_chat_words(&self, utterance: &mut Utterance) {
        let actual_words = segmenting::utterance_words(&utterance.actual);
        let target_words = segmenting::utterance_words(&utterance.target);

        for (actual, target) in actual_words.iter().zip(&target_words) {
            let standard = match self.profile.standard_form {
                StandardForm::Actual => actual,
                StandardForm::Target => target,
            };
            let mut word = Word::new(cleaning::clean_word(standard));
            word.language = self.profile.word_languages.of_word(standard);
            word.actual = cleaning::clean_word(actual);
            word.target = cleaning::clean_word(target);
            utterance.words.push(word);
        }

        let words: Vec<&str> = utterance
            .words
            .iter()
            .map(|word| word.word.as_str())
            .collect();
        utterance.utterance = words.join(" ");
    }

    fn toolbox_utterance(&self, record: &Record) -> Utterance {
        let reader = ToolboxAnnotations::new(record, self.profile);
        let mut utterance = self.annotated(&reader);
        let source_id = reader.source_id();
        utterance.source_id = if source_id.is_empty() {
            format!("{}_{}", self.source_id, record.uid)
        } else {
            source_id
        };
        utterance.actual = self.profile.clean_utterance(&reader.actual_utterance());
        utterance.target = self.profile.clean_utterance(&reader.target_utterance());
        self.add_insecure_warnings(&mut utterance);
        self.add_toolbox_words(&mut utterance);
        self.add_morphemes(&mut utterance, &reader);
        utterance
    }

    /// `[=? form]` marks a stretch the transcriber was unsure about. Each
    /// marker becomes a warning naming the form that might have been
    /// intended, read off the raw utterance before cleaning removes it.
    fn add_insecure_warnings(&self, utterance: &mut Utterance) {
        let steps = &self.profile.utterance_cleaning;
        if !steps.contains(&TierCleanStep::RemoveInsecureMarkers) {
            return;
        }
        for target in cleaning::insecure_targets(&utterance.utterance_raw) {
            utterance
                .warnings
                .push(Warning::insecure_transcription(target));
        }
    }

    /// Toolbox words come out of the cleaned utterance; the main tier has
    /// no actual/target distinction.
    fn add_toolbox_words(&self, utterance: &mut Utterance) {
        utterance.utterance = utterance.actual.clone();
        for raw in segmenting::utterance_words(&utterance.actual) {
            let mut word = Word::new(cleaning::unify_unknown(&raw));
            word.actual = word.word.clone();
            utterance.words.push(word);
        }
    }

    /// Builds the morpheme groups from the cleaned morphology tiers and
    /// aligns them, first word against word, then unit against unit inside
    /// each word. A tier that disagrees with the main tier's count is
    /// blanked to the main tier's shape; the word stage warns on the
    /// utterance, the unit stage on the word the mismatch belongs to.
    fn add_morphemes(&self, utterance: &mut Utterance, reader: &dyn FormatReader) {
        let profile = self.profile;
        let style = profile.style;
        let main = profile.main_tier;
        let boundary = profile.boundary;

        let seg_tier = profile.clean_seg_tier(&utterance.seg_tier);
        let gloss_tier = profile.clean_morph_tier(&utterance.gloss_tier);
        let pos_tier = profile.clean_morph_tier(&utterance.pos_tier);

        let mut lists = vec![
            TierUnits::new(MorphTier::Segments, style.seg_words(&seg_tier, boundary)),
            TierUnits::new(MorphTier::Glosses, style.gloss_words(&gloss_tier, boundary)),
            TierUnits::new(MorphTier::Poses, style.pos_words(&pos_tier, boundary)),
        ];
        if !profile.tiers.language.is_empty() {
            let lang_tier = profile.clean_morph_tier(&reader.lang_tier());
            lists.push(TierUnits::new(
                MorphTier::Languages,
                style.lang_words(&lang_tier, boundary),
            ));
        }
        if !profile.tiers.lemma_id.is_empty() {
            let id_tier = profile.clean_morph_tier(&reader.id_tier());
            lists.push(TierUnits::new(
                MorphTier::LemmaIds,
                style.id_words(&id_tier, boundary),
            ));
        }

        let mut lists = main_first(main, lists);
        utterance
            .warnings
            .extend(aligning::reconcile(&mut lists, main));

        let count = lists.first().map_or(0, |list| list.units.len());
        let mut shape = Vec::with_capacity(count);
        let mut units_by_word = Vec::with_capacity(count);
        let mut kinds_by_word = Vec::with_capacity(count);

        for at in 0..count {
            let pos_word = word_of(&lists, MorphTier::Poses, at);
            let mut units = vec![
                TierUnits::new(
                    MorphTier::Segments,
                    style.segments(&word_of(&lists, MorphTier::Segments, at)),
                ),
                TierUnits::new(
                    MorphTier::Glosses,
                    style.glosses(&word_of(&lists, MorphTier::Glosses, at)),
                ),
                TierUnits::new(MorphTier::Poses, style.poses(&pos_word)),
            ];
            if !profile.tiers.language.is_empty() {
                units.push(TierUnits::new(
                    MorphTier::Languages,
                    style.langs(&word_of(&lists, MorphTier::Languages, at)),
                ));
            }
            if !profile.tiers.lemma_id.is_empty() {
                units.push(TierUnits::new(
                    MorphTier::LemmaIds,
                    style.ids(&word_of(&lists, MorphTier::LemmaIds, at)),
                ));
            }

            let mut units = main_first(main, units);
            let warnings = aligning::reconcile(&mut units, main);
            match utterance.words.get_mut(at) {
                Some(word) => word.warnings.extend(warnings),
                // a morpheme-word past the word list still reports on the utterance
                None => utterance.warnings.extend(warnings),
            }

            let unit_count = units.first().map_or(0, |list| list.units.len());
            let mut kinds = style.kinds(&pos_word);
            if kinds.len() != unit_count {
                kinds = vec![MorphemeKind::Unknown; unit_count];
            }

            shape.push(unit_count);
            kinds_by_word.push(kinds);
            units_by_word.push(units);
        }

        let mut arena = MorphemeArena::new(&shape);
        for (at, units) in units_by_word.iter().enumerate() {
            for list in units {
                if let Err(err) = arena.fill_tier(at, list.tier, &list.units) {
                    tracing::warn!(%err, "dropping units outside the morpheme shape");
                }
            }
            if let Err(err) = arena.fill_kinds(at, &kinds_by_word[at]) {
                tracing::warn!(%err, "dropping kinds outside the morpheme shape");
            }
        }

        let mut groups = arena.into_groups();
        for group in &mut groups {
            aligning::mirror_stem_values(group);
            for morpheme in group.iter_mut() {
                morpheme.language = profile.morpheme_language.infer(
                    &morpheme.segment,
                    &morpheme.pos_raw,
                    &morpheme.language,
                );
            }
        }
        utterance.morphemes = groups;

        aligning::link_words_morphemes(utterance, main);
    }
}

impl Iterator for SessionCursor<'_> {
    type Item = Utterance;

    fn next(&mut self) -> Option<Utterance> {
        let record = self.next_record()?;
        Some(self.utterance(&record))
    }
}

fn chat_source(raw: &str) -> Source {
    let text = chat::join_continuations(raw);
    let spans = chat::record_spans(&text);
    Source::Chat { text, spans }
}

/// Session id from the file name: everything before the first dot.
fn file_stem(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .unwrap_or("")
        .to_string()
}

/// Moves the main tier's list to the front; [`aligning::reconcile`] takes
/// its unit count from the first non-empty list.
fn main_first(main: MorphTier, mut lists: Vec<TierUnits>) -> Vec<TierUnits> {
    if let Some(at) = lists.iter().position(|list| list.tier == main) {
        let list = lists.remove(at);
        lists.insert(0, list);
    }
    lists
}

/// The reconciled morpheme-word of one tier at one position.
fn word_of(lists: &[TierUnits], tier: MorphTier, at: usize) -> String {
    lists
        .iter()
        .find(|list| list.tier == tier)
        .and_then(|list| list.units.get(at))
        .cloned()
        .unwrap_or_default()
}

fn speaker_from(participant: &Participant) -> Speaker {
    let mut speaker = Speaker::new(participant.code.clone());
    speaker.name = participant.name.clone();
    speaker.role = participant.role.clone();
    speaker.age = participant.age.clone();
    speaker.gender = participant.sex.clone();
    speaker.languages = participant.language.clone();
    speaker.birth_date = cleaning::clean_date(&participant.birth_date);
    speaker
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpora::profiles;

    const ENGLISH_SESSION: &str = "@UTF8\n\
@Begin\n\
@Languages:\teng\n\
@Participants:\tCHI Anna Target_Child , MOT Ruth Mother\n\
@ID:\teng|Manchester|CHI|1;11.24|female|||Target_Child||\n\
@Birth of CHI:\t25-MAY-1997\n\
@Date:\t12-JAN-1999\n\
@Media:\tanna01, audio\n\
*CHI:\tmama go(es) . 0_1500\n\
%mor:\tn|mama v|go-3S .\n\
*MOT:\tyeah .\n\
@End\n";

    const CHINTANG_SESSION: &str = "\\ref CLDLCh1R01S01.001\n\
\\ELANParticipant LDCh1\n\
\\ELANBegin 00:00:21.400\n\
\\ELANEnd 00:00:23.180\n\
\\gw peisi natha\n\
\\mph peis -i natha\n\
\\mgl talk -1SG later\n\
\\ps vt -gm adv\n\
\\lg C -C N\n\
\\id 55 -56 57\n\
\\eng I will talk later\n\
\\nep म पछि ।\n\
\n\
\\ref CLDLCh1R01S01.002\n\
\\tx @Date of recording: 2004-01-01\n\
\n\
\\ref CLDLCh1R01S01.003\n\
\\gw ai mappa\n";

    const RUSSIAN_SESSION: &str = "\\ref A001.001\n\
\\EUDICOp CHI\n\
\\text кот [=? коты] спит .\n\
\\lem кот спать\n\
\\mor NOUN:NOM:SG V-PRES:3:SG\n";

    #[test]
    fn test_english_session_metadata() {
        let profile = profiles::english();
        let session = SessionCursor::from_text(ENGLISH_SESSION, "anna01", &profile)
            .unwrap()
            .parse();

        assert_eq!(session.source_id, "anna01");
        assert_eq!(session.date, "1999-01-12");
        assert_eq!(session.media_filename, "anna01");
        assert_eq!(session.speakers.len(), 2);

        let chi = session.speaker("CHI").unwrap();
        assert_eq!(chi.name, "Anna");
        assert_eq!(chi.role, "Target_Child");
        assert_eq!(chi.age, "1;11.24");
        assert_eq!(chi.gender, "female");
        assert_eq!(chi.languages, "eng");
        assert_eq!(chi.birth_date, "1997-05-25");

        let mot = session.speaker("MOT").unwrap();
        assert_eq!(mot.name, "Ruth");
        assert_eq!(mot.role, "Mother");
    }

    #[test]
    fn test_english_utterance_assembly() {
        let profile = profiles::english();
        let session = SessionCursor::from_text(ENGLISH_SESSION, "anna01", &profile)
            .unwrap()
            .parse();
        assert_eq!(session.utterances.len(), 2);

        let utterance = &session.utterances[0];
        assert_eq!(utterance.source_id, "anna01_0");
        assert_eq!(utterance.speaker_label, "CHI");
        assert_eq!(utterance.utterance_raw, "mama go(es) .");
        assert_eq!(utterance.actual, "mama go");
        assert_eq!(utterance.target, "mama goes");
        assert_eq!(utterance.utterance, "mama go");
        assert_eq!(utterance.translation, "mama go(es) .");
        assert_eq!(utterance.sentence_type, "default");
        assert_eq!(utterance.start, "0");
        assert_eq!(utterance.end, "1500");
        assert_eq!(utterance.seg_tier, "n|mama v|go-3S .");
        assert!(utterance.is_aligned());

        assert_eq!(utterance.words.len(), 2);
        assert_eq!(utterance.words[0].word, "mama");
        assert_eq!(utterance.words[0].language, "English");
        assert_eq!(utterance.words[0].pos_raw, "n");
        assert_eq!(utterance.words[1].actual, "go");
        assert_eq!(utterance.words[1].target, "goes");
        assert_eq!(utterance.words[1].pos_raw, "v");
    }

    #[test]
    fn test_english_morphemes_and_linkage() {
        let profile = profiles::english();
        let session = SessionCursor::from_text(ENGLISH_SESSION, "anna01", &profile)
            .unwrap()
            .parse();

        let utterance = &session.utterances[0];
        assert_eq!(utterance.morphemes.len(), 2);

        let mama = &utterance.morphemes[0][0];
        assert_eq!(mama.segment, "mama");
        assert_eq!(mama.gloss_raw, "mama");
        assert_eq!(mama.pos_raw, "n");
        // the canonical slots stay empty at this layer
        assert_eq!(mama.pos, "");
        assert_eq!(mama.language, "English");
        assert_eq!(mama.kind, MorphemeKind::Stem);
        assert_eq!(mama.word_index, Some(0));

        let go = &utterance.morphemes[1];
        assert_eq!(go.len(), 2);
        assert_eq!(go[0].segment, "go");
        assert_eq!(go[0].kind, MorphemeKind::Stem);
        assert_eq!(go[1].segment, "");
        assert_eq!(go[1].gloss_raw, "3S");
        assert_eq!(go[1].pos_raw, "sfx");
        assert_eq!(go[1].kind, MorphemeKind::Suffix);
        assert_eq!(go[1].word_index, Some(1));
    }

    #[test]
    fn test_chat_record_without_morphology_warns() {
        let profile = profiles::english();
        let session = SessionCursor::from_text(ENGLISH_SESSION, "anna01", &profile)
            .unwrap()
            .parse();

        let utterance = &session.utterances[1];
        assert_eq!(utterance.utterance, "yeah");
        assert!(utterance.morphemes.is_empty());
        assert!(utterance
            .warnings
            .contains(&Warning::word_alignment(MorphTier::Glosses)));
        assert!(!utterance.is_aligned());
    }

    #[test]
    fn test_chat_repetitions_multiply_words() {
        let profile = profiles::english();
        let session = SessionCursor::from_text("*CHI:\tgo [x 2] home .", "rep01", &profile)
            .unwrap()
            .parse();

        let utterance = &session.utterances[0];
        assert_eq!(utterance.utterance, "go go home");
        let words: Vec<&str> = utterance.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["go", "go", "home"]);
    }

    #[test]
    fn test_nungon_caret_stems_mirror_segments() {
        let profile = profiles::nungon();
        let session = SessionCursor::from_text(
            "*CHI:\tmama go(es) .\n%xcod:\tn^mama v^go-sfx\n",
            "nun01",
            &profile,
        )
        .unwrap()
        .parse();

        let utterance = &session.utterances[0];
        assert_eq!(utterance.actual, "mama go");
        assert_eq!(utterance.target, "mama goes");
        assert!(utterance.is_aligned());

        let mama = &utterance.morphemes[0][0];
        assert_eq!(mama.segment, "mama");
        assert_eq!(mama.gloss_raw, "mama");
        assert_eq!(mama.pos_raw, "n");
        assert_eq!(mama.language, "Nungon");
        assert_eq!(mama.word_index, Some(0));

        let go = &utterance.morphemes[1];
        assert_eq!(go[0].segment, "go");
        assert_eq!(go[0].pos_raw, "v");
        // affix segments are never filled in from the gloss
        assert_eq!(go[1].segment, "");
        assert_eq!(go[1].gloss_raw, "sfx");
        assert_eq!(go[1].pos_raw, "sfx");
        assert_eq!(go[1].kind, MorphemeKind::Suffix);
        assert_eq!(go[1].word_index, Some(1));
    }

    #[test]
    fn test_cursor_iterates_utterances() {
        let profile = profiles::english();
        let cursor = SessionCursor::from_text(ENGLISH_SESSION, "anna01", &profile).unwrap();
        assert_eq!(cursor.record_count(), 2);

        let utterances: Vec<Utterance> = cursor.collect();
        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].source_id, "anna01_0");
        assert_eq!(utterances[1].source_id, "anna01_1");
    }

    #[test]
    fn test_chintang_session() {
        let profile = profiles::chintang();
        let session = SessionCursor::from_text(CHINTANG_SESSION, "CLDLCh1R01S01", &profile)
            .unwrap()
            .parse();

        // the middle record carries `@`-metadata and is skipped
        assert_eq!(session.utterances.len(), 2);

        let utterance = &session.utterances[0];
        assert_eq!(utterance.source_id, "CLDLCh1R01S01.001");
        assert_eq!(utterance.speaker_label, "LDCh1");
        assert_eq!(utterance.start, "00:00:21.400");
        assert_eq!(utterance.end, "00:00:23.180");
        assert_eq!(utterance.translation, "I will talk later");
        assert_eq!(utterance.sentence_type, "default");
        assert_eq!(utterance.utterance, "peisi natha");
        assert!(utterance.is_aligned());

        assert_eq!(utterance.words.len(), 2);
        assert_eq!(utterance.words[0].word, "peisi");
        assert_eq!(utterance.words[0].actual, "peisi");
        assert_eq!(utterance.words[0].target, "");

        let first = &utterance.morphemes[0];
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].segment, "peis");
        assert_eq!(first[0].gloss_raw, "talk");
        assert_eq!(first[0].pos_raw, "vt");
        assert_eq!(first[0].language, "C");
        assert_eq!(first[0].lemma_id, "55");
        assert_eq!(first[1].segment, "-i");
        assert_eq!(first[1].gloss_raw, "-1SG");
        assert_eq!(first[1].word_index, Some(0));

        let second = &utterance.morphemes[1];
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].segment, "natha");
        assert_eq!(second[0].word_index, Some(1));
    }

    #[test]
    fn test_unannotated_toolbox_record_warns() {
        let profile = profiles::chintang();
        let session = SessionCursor::from_text(CHINTANG_SESSION, "CLDLCh1R01S01", &profile)
            .unwrap()
            .parse();

        let utterance = &session.utterances[1];
        assert_eq!(utterance.words.len(), 2);
        assert!(utterance.morphemes.is_empty());
        assert!(utterance
            .warnings
            .contains(&Warning::word_alignment(MorphTier::Glosses)));
        assert!(!utterance.is_aligned());
    }

    #[test]
    fn test_toolbox_tier_mismatch_blanks_and_warns() {
        let profile = profiles::chintang();
        let text = "\\ref mm.001\n\
\\gw peisi natha\n\
\\mph peis -i natha\n\
\\mgl talk -1SG later\n\
\\ps vt\n";
        let session = SessionCursor::from_text(text, "mm", &profile).unwrap().parse();

        let utterance = &session.utterances[0];
        assert!(utterance
            .warnings
            .contains(&Warning::tier_alignment(MorphTier::Glosses, MorphTier::Poses)));

        // the main tier survives, the misaligned tier is blanked
        let first = &utterance.morphemes[0];
        assert_eq!(first[0].gloss_raw, "talk");
        assert_eq!(first[0].pos_raw, "");
        assert_eq!(first[0].kind, MorphemeKind::Unknown);

        // word counts still match, so words and morphemes stay linked
        assert!(utterance.is_aligned());
        assert_eq!(first[0].word_index, Some(0));
    }

    #[test]
    fn test_russian_session() {
        let profile = profiles::russian();
        let session = SessionCursor::from_text(RUSSIAN_SESSION, "A001", &profile)
            .unwrap()
            .parse();

        let utterance = &session.utterances[0];
        assert_eq!(utterance.speaker_label, "CHI");
        assert_eq!(utterance.utterance, "кот спит");
        assert_eq!(utterance.sentence_type, "default");
        assert!(utterance
            .warnings
            .contains(&Warning::insecure_transcription("коты")));
        assert!(utterance.is_aligned());

        let first = &utterance.morphemes[0];
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].segment, "кот");
        assert_eq!(first[0].gloss_raw, "NOM:SG");
        assert_eq!(first[0].pos_raw, "NOUN");
        assert_eq!(first[0].language, "Russian");

        let second = &utterance.morphemes[1];
        assert_eq!(second[0].gloss_raw, "PRES:3:SG");
        assert_eq!(second[0].pos_raw, "V");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let profile = profiles::english();
        let err = SessionCursor::open("/nonexistent/anna01.cha", &profile).unwrap_err();
        assert!(matches!(err, SessionError::Io(_)));
        assert!(err.to_string().starts_with("cannot read session file"));
    }

    #[test]
    fn test_file_stem_cuts_at_first_dot() {
        assert_eq!(file_stem(Path::new("/corpora/russian/A00210817.cha")), "A00210817");
        assert_eq!(file_stem(Path::new("LDCh1R01S02.02.txt")), "LDCh1R01S02");
    }
}
