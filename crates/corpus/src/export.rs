//! Fine-tuning dataset shapes and the model-file transcript.
//!
//! Every record is built from the basic prompt template: fine-tuned
//! models are queried with that template, so training examples must not
//! carry the style rules.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::prompts::{render_basic, SYSTEM_MESSAGE};
use crate::{Dataset, Result};

pub const MODELFILE_TEMPERATURE: f64 = 0.2;

/// Alpaca-style record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstructionRecord {
    pub instruction: String,
    pub input: String,
    pub output: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// ChatML-style record: one user turn, one assistant turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DialogueRecord {
    pub messages: Vec<Message>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Dialogue records, one JSON object per line.
    ChatMl,
    /// Instruction records in a single JSON array.
    Alpaca,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::ChatMl => "jsonl",
            ExportFormat::Alpaca => "json",
        }
    }
}

pub fn to_instruction_format(dataset: &Dataset) -> Vec<InstructionRecord> {
    dataset
        .pairs()
        .map(|p| InstructionRecord {
            instruction: render_basic(&p.original),
            input: String::new(),
            output: p.simplified.clone(),
        })
        .collect()
}

pub fn to_dialogue_format(dataset: &Dataset) -> Vec<DialogueRecord> {
    dataset
        .pairs()
        .map(|p| DialogueRecord {
            messages: vec![
                Message {
                    role: Role::User,
                    content: render_basic(&p.original),
                },
                Message {
                    role: Role::Assistant,
                    content: p.simplified.clone(),
                },
            ],
        })
        .collect()
}

/// Single JSON array, 4-space indentation.
pub fn save_json<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let mut ser = serde_json::Serializer::with_formatter(&mut w, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut ser)?;
    w.flush()?;
    Ok(())
}

/// One compact JSON object per line; non-ASCII stays unescaped.
pub fn save_jsonl<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for rec in records {
        serde_json::to_writer(&mut w, rec)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

/// Writes `dataset` as `<dir>/<name>.<ext>` in the chosen shape.
pub fn save(dataset: &Dataset, format: ExportFormat, dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{name}.{}", format.extension()));
    match format {
        ExportFormat::ChatMl => save_jsonl(&to_dialogue_format(dataset), &path)?,
        ExportFormat::Alpaca => save_json(&to_instruction_format(dataset), &path)?,
    }
    Ok(path)
}

/// Plain-text model definition: base model, decoding temperature and
/// system message, then one user/assistant example per row.
pub fn modelfile(dataset: &Dataset, base_model: &str) -> String {
    let mut out = format!(
        "FROM {base_model}\nPARAMETER temperature {MODELFILE_TEMPERATURE}\nSYSTEM \"\"\"\n{SYSTEM_MESSAGE}\n\"\"\"\n"
    );
    let prefix = render_basic("");
    for p in dataset.pairs() {
        out.push_str("MESSAGE user \"\"\"");
        out.push_str(&prefix);
        out.push_str(&p.original);
        out.push_str("\n\"\"\"\n");
        out.push_str("MESSAGE assistant \"\"\"\n");
        out.push_str(&p.simplified);
        out.push_str("\n\"\"\"\n");
    }
    out
}

pub fn write_modelfile(dataset: &Dataset, base_model: &str, path: &Path) -> Result<()> {
    std::fs::write(path, modelfile(dataset, base_model))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CorpusRow;

    #[test]
    fn test_dialogue_is_user_then_assistant() {
        let ds = Dataset::from_pairs([CorpusRow::new("Schwerer Text.", "Leichter Text.")]);
        let recs = to_dialogue_format(&ds);
        assert_eq!(recs.len(), 1);
        let m = &recs[0].messages;
        assert_eq!(m.len(), 2);
        assert_eq!(m[0].role, Role::User);
        assert_eq!(m[1].role, Role::Assistant);
        assert_eq!(m[0].content, render_basic("Schwerer Text."));
        assert_eq!(m[1].content, "Leichter Text.");
    }

    #[test]
    fn test_instruction_record_fields() {
        let ds = Dataset::from_pairs([CorpusRow::new("Schwerer Text.", "Leichter Text.")]);
        let recs = to_instruction_format(&ds);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].input, "");
        assert_eq!(recs[0].output, "Leichter Text.");
        assert!(recs[0].instruction.ends_with("Schwerer Text.\n"));
        assert!(!recs[0].instruction.contains("Beachte dabei"));
    }

    #[test]
    fn test_modelfile_layout() {
        let ds = Dataset::from_pairs([CorpusRow::new("Original.", "Einfach.")]);
        let text = modelfile(&ds, "llama3.1");
        assert!(text.starts_with("FROM llama3.1\nPARAMETER temperature 0.2\nSYSTEM \"\"\"\n"));
        assert!(text.contains(&format!("MESSAGE user \"\"\"{}Original.\n\"\"\"\n", render_basic(""))));
        assert!(text.ends_with("MESSAGE assistant \"\"\"\nEinfach.\n\"\"\"\n"));
    }
}
