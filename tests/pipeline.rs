use datasweep::model::CellValue;
use datasweep::parser::ParserFactory;
use datasweep::transform::{fill_missing_numeric, remove_duplicates};
use datasweep::{process, process_batch, ConvertOptions, Format, InputFile, SweepError};

fn markdown_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches('|')
                .trim_end_matches('|')
                .split('|')
                .map(|cell| cell.trim().to_string())
                .collect()
        })
        .collect()
}

#[test]
fn csv_to_markdown_with_cleaning() {
    let options = ConvertOptions::new(Format::Markdown)
        .with_remove_duplicates(true)
        .with_fill_missing(true)
        .with_fill_columns(vec!["a".to_string()]);

    let conversion = process(b"a,b\n1,\n1,3\n,4\n", "sample.csv", &options).unwrap();

    assert_eq!(conversion.report.duplicates_removed, 0);
    assert_eq!(conversion.report.filled.get("a"), Some(&1));
    assert_eq!(conversion.output_file_name, "sample.md");
    assert_eq!(conversion.output.mime_type, "text/markdown");

    let text = String::from_utf8(conversion.output.bytes).unwrap();
    let rows = markdown_rows(&text);
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], vec!["a", "b"]);
    assert!(rows[1].iter().all(|c| !c.is_empty() && c.chars().all(|ch| ch == '-')));
    assert_eq!(rows[2], vec!["1", ""]);
    assert_eq!(rows[3], vec!["1", "3"]);
    assert_eq!(rows[4], vec!["1", "4"]);
}

#[test]
fn csv_round_trip_preserves_values() {
    let input = "id,name,score,joined,active\n\
                 1,\"Smith, Ann\",9.5,2023-04-01,true\n\
                 2,\"multi\nline\",,2023-04-02,false\n\
                 3,plain,7,,\n";
    let options = ConvertOptions::new(Format::Csv);
    let first = process(input.as_bytes(), "people.csv", &options).unwrap();

    let reloaded = ParserFactory::new()
        .parse(&first.output.bytes, Format::Csv)
        .unwrap();

    assert_eq!(reloaded.column_names(), first.table.column_names());
    let original: Vec<_> = first.table.rows.iter().map(|r| r.cells.clone()).collect();
    let round: Vec<_> = reloaded.rows.iter().map(|r| r.cells.clone()).collect();
    assert_eq!(round, original);
    assert_eq!(round[2][3], CellValue::Null);
}

#[test]
fn batch_isolates_failures() {
    let files = vec![
        InputFile::new("good.csv", "x,y\n1,2\n"),
        InputFile::new("notes.txt", "x,y\n1,2\n"),
        InputFile::new("broken.md", "| x | y |\n| 1 | 2 |\n"),
        InputFile::new("page.html", "<table><tr><th>x</th></tr><tr><td>5</td></tr></table>"),
    ];
    let options = ConvertOptions::new(Format::Csv);

    let outcomes = process_batch(&files, &options);
    assert_eq!(outcomes.len(), 4);

    assert!(outcomes[0].is_ok());

    let err = outcomes[1].as_ref().unwrap_err();
    assert_eq!(err.file_name, "notes.txt");
    assert!(matches!(err.error, SweepError::UnsupportedFormat { .. }));

    let err = outcomes[2].as_ref().unwrap_err();
    assert_eq!(err.file_name, "broken.md");
    assert!(matches!(err.error, SweepError::Parse { format: Format::Markdown, .. }));

    let page = outcomes[3].as_ref().unwrap();
    assert_eq!(String::from_utf8(page.output.bytes.clone()).unwrap(), "x\n5\n");
}

#[test]
fn batch_keeps_files_with_the_same_name() {
    let files = vec![
        InputFile::new("data.csv", "v\n1\n"),
        InputFile::new("data.csv", "v\n2\n"),
    ];
    let outcomes = process_batch(&files, &ConvertOptions::default());
    let values: Vec<_> = outcomes
        .iter()
        .map(|o| o.as_ref().unwrap().table.rows[0].cells[0].clone())
        .collect();
    assert_eq!(values, vec![CellValue::Int(1), CellValue::Int(2)]);
}

#[test]
fn unknown_column_fails_file() {
    let options = ConvertOptions::default().with_keep_columns(vec!["missing".to_string()]);
    let err = process(b"a,b\n1,2\n", "t.csv", &options).unwrap_err();
    assert!(matches!(err.error, SweepError::UnknownColumn(ref n) if n == "missing"));
    assert!(err.to_string().contains("t.csv"));
}

#[test]
fn duplicate_header_fails_file() {
    let err = process(b"a,a\n1,2\n", "dup.csv", &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err.error, SweepError::DuplicateColumn(_)));
}

#[test]
fn html_table_converts_through_excel() {
    let html = "<html><body><table>\
        <thead><tr><th>item</th><th>qty</th><th>price</th></tr></thead>\
        <tbody>\
        <tr><td>bolt</td><td>4</td><td>0.25</td></tr>\
        <tr><td>nut</td><td></td><td>0.1</td></tr>\
        </tbody></table></body></html>";

    let to_excel = process(html.as_bytes(), "stock.html", &ConvertOptions::new(Format::Xlsx)).unwrap();
    assert_eq!(to_excel.output_file_name, "stock.xlsx");

    let to_csv = process(&to_excel.output.bytes, "stock.xlsx", &ConvertOptions::new(Format::Csv)).unwrap();
    assert_eq!(
        String::from_utf8(to_csv.output.bytes).unwrap(),
        "item,qty,price\nbolt,4,0.25\nnut,,0.1\n"
    );
}

#[test]
fn markdown_output_loads_back() {
    let csv = "name,note\nann,a|b\nbo,\n";
    let conversion = process(csv.as_bytes(), "n.csv", &ConvertOptions::new(Format::Markdown)).unwrap();

    let back = ParserFactory::new()
        .parse(&conversion.output.bytes, Format::Markdown)
        .unwrap();
    assert_eq!(back.column_names(), vec!["name", "note"]);
    assert_eq!(back.rows[0].cells[1], CellValue::from("a|b"));
    assert_eq!(back.rows[1].cells[1], CellValue::Null);
}

#[test]
fn cleaning_properties_hold() {
    let csv = "k,v,w\n1,2.5,x\n1,2.5,x\n2,,y\n3,4,\n2,,y\n,1,x\n";
    let mut table = ParserFactory::new().parse(csv.as_bytes(), Format::Csv).unwrap();
    let original_rows = table.row_count();

    let removed = remove_duplicates(&mut table);
    assert_eq!(removed, 2);
    assert!(table.row_count() <= original_rows);
    for (i, a) in table.rows.iter().enumerate() {
        for b in table.rows.iter().skip(i + 1) {
            assert_ne!(a.cells, b.cells);
        }
    }
    assert_eq!(remove_duplicates(&mut table), 0);

    let mean_before = |t: &datasweep::Table, idx: usize| {
        let values: Vec<f64> = t.column_cells(idx).filter_map(|c| c.as_f64()).collect();
        values.iter().sum::<f64>() / values.len() as f64
    };
    let k_mean = mean_before(&table, 0);
    let v_mean = mean_before(&table, 1);

    let outcome = fill_missing_numeric(&mut table);
    assert!(table.column_cells(0).all(|c| !c.is_null()));
    assert!(table.column_cells(1).all(|c| !c.is_null()));
    assert!((mean_before(&table, 0) - k_mean).abs() < 1e-9);
    assert!((mean_before(&table, 1) - v_mean).abs() < 1e-9);
    // Text column keeps its gap
    assert!(table.rows[2].cells[2].is_null());
    assert!(!outcome.filled.contains_key("w"));

    let snapshot = table.clone();
    fill_missing_numeric(&mut table);
    assert_eq!(table, snapshot);
}
