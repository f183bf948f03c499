use corpus::{table, CorpusRow, Dataset, RunKey, RunOutput, Source};

#[test]
fn test_scored_table_survives_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scored.csv");

    let mut ds = Dataset::from_pairs([
        CorpusRow::new("Die Trägerschaft liegt bei der Gemeinde.", "Die Gemeinde ist zuständig."),
        CorpusRow::new("Es kann gewählt werden.", "Sie können wählen."),
    ]);
    ds.score_references();
    let key = RunKey::new("llama3.1-leichte-sprache:fs", true);
    ds.record_run(1, &key, RunOutput::scored("Sie dürfen wählen.".into()));

    table::write(&ds, &path).unwrap();
    let back = table::read(&path).unwrap();

    assert_eq!(back.runs, vec![key.clone()]);
    assert_eq!(back.len(), 2);
    assert!(back.rows[0].runs.is_empty());
    assert_eq!(back.rows[1].runs[&key].text, "Sie dürfen wählen.");
    assert_eq!(back.rows[1].runs[&key].scores, ds.rows[1].runs[&key].scores);
    assert_eq!(back.rows[0].original_scores, ds.rows[0].original_scores);
}

#[test]
fn test_header_line_of_scored_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scored.csv");

    let mut ds = Dataset::from_pairs([CorpusRow::new("Hallo Welt.", "Hallo.")]);
    ds.score_references();
    ds.register_run(&RunKey::new("m", false));
    table::write(&ds, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(
        header,
        "Original,Leichte Sprache,Original FRE Score,Leichte Sprache FRE Score,\
         Original WSTF Score,Leichte Sprache WSTF Score,Leichte Sprache m,m FRE Score,m WSTF Score"
    );
    // run registered but no output: three empty cells
    assert!(text.lines().nth(1).unwrap().ends_with(",,,"));
}

#[test]
fn test_read_keeps_source_headers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.csv");
    std::fs::write(&path, "Quelle,Ziel\nText.,\n").unwrap();

    let ds = table::read(&path).unwrap();
    assert_eq!(ds.source_for("Quelle"), Some(Source::Original));
    assert_eq!(ds.source_for("Ziel"), Some(Source::Simplified));
    assert_eq!(ds.source_for("Original"), None);
    // no cleaning on read
    assert_eq!(ds.rows[0].pair.simplified, "");
}
