use corpus::export::{self, DialogueRecord, ExportFormat, InstructionRecord};
use corpus::prompts::render_basic;
use corpus::{load_and_split, CorpusRow, Dataset};

fn sample() -> Dataset {
    Dataset::from_pairs([
        CorpusRow::new("Die Öffnungszeiten variieren.", "Die Öffnungs-Zeiten sind verschieden."),
        CorpusRow::new("Es gibt drei Kinderkrippen.", "Es gibt 3 Krippen für kleine Kinder."),
    ])
}

#[test]
fn test_jsonl_one_compact_object_per_line_unescaped() {
    let dir = tempfile::tempdir().unwrap();
    let path = export::save(&sample(), ExportFormat::ChatMl, dir.path(), "train").unwrap();
    assert_eq!(path, dir.path().join("train.jsonl"));

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Öffnungs-Zeiten"));
    assert!(!lines[0].contains("\\u00d6"));

    let rec: DialogueRecord = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(rec.messages[0].content, render_basic("Es gibt drei Kinderkrippen."));
    assert_eq!(rec.messages[1].content, "Es gibt 3 Krippen für kleine Kinder.");
}

#[test]
fn test_json_array_for_instruction_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = export::save(&sample(), ExportFormat::Alpaca, dir.path(), "test").unwrap();
    assert_eq!(path, dir.path().join("test.json"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[\n    {\n        \"instruction\""));
    let recs: Vec<InstructionRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(recs, export::to_instruction_format(&sample()));
}

#[test]
fn test_every_row_exported_once_with_verbatim_output() {
    let ds = sample();
    let inst = export::to_instruction_format(&ds);
    let dia = export::to_dialogue_format(&ds);
    assert_eq!(inst.len(), ds.len());
    assert_eq!(dia.len(), ds.len());
    for ((row, i), d) in ds.pairs().zip(&inst).zip(&dia) {
        assert_eq!(i.output, row.simplified);
        assert_eq!(d.messages[1].content, row.simplified);
    }
}

#[test]
fn test_load_and_split_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    let mut body = String::from("in,out\n");
    for i in 0..10 {
        body.push_str(&format!("Satz {i}.,Kurz {i}.\n"));
    }
    std::fs::write(&path, body).unwrap();

    let a = load_and_split(&path, 0.8, 42).unwrap();
    let b = load_and_split(&path, 0.8, 42).unwrap();
    assert_eq!(a.train.len(), 8);
    assert_eq!(a.test.len(), 2);
    assert_eq!(a.train, b.train);
}
