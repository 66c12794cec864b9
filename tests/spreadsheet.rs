use std::fs;

use datahub_setup::SetupError;
use datahub_setup::io::spreadsheet::read_document;
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

const HEADERS: [&str; 2] = ["Name", "Email"];
const ROWS: [[&str; 2]; 3] = [
    ["Alice", "alice@example.org"],
    ["Bob", "bob@example.org"],
    ["Carol", "alice@example.org"],
];

#[test]
fn csv_keeps_headers_and_rows() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("contacts.csv");
    fs::write(
        &path,
        "Name,Email\nAlice,alice@example.org\nBob,bob@example.org\nCarol,alice@example.org\n",
    )
    .expect("CSV written");

    let document = read_document(&path).expect("CSV read");

    assert_eq!(document.sheets().len(), 1);
    let sheet = &document.sheets()[0];
    assert_eq!(sheet.name, "contacts");
    assert_eq!(sheet.headers(), &HEADERS);
    assert_eq!(sheet.rows().len(), 3);
    assert_eq!(sheet.rows()[1], ROWS[1]);
}

#[test]
fn tsv_matches_csv() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("contacts.tsv");
    fs::write(
        &path,
        "Name\tEmail\nAlice\talice@example.org\nBob\tbob@example.org\nCarol\talice@example.org\n",
    )
    .expect("TSV written");

    let document = read_document(&path).expect("TSV read");

    let sheet = &document.sheets()[0];
    assert_eq!(sheet.headers(), &HEADERS);
    assert_eq!(sheet.rows(), &ROWS.map(|row| row.map(str::to_string).to_vec()));
}

#[test]
fn workbook_matches_csv() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("contacts.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Data_Providers").expect("sheet named");
    for (column, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, column as u16, *header)
            .expect("header written");
    }
    for (row, cells) in ROWS.iter().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            worksheet
                .write_string(row as u32 + 1, column as u16, *cell)
                .expect("cell written");
        }
    }
    workbook.save(&path).expect("workbook saved");

    let document = read_document(&path).expect("workbook read");

    assert_eq!(document.sheets().len(), 1);
    let sheet = document.sheet("Data_Providers").expect("sheet present");
    assert_eq!(sheet.headers(), &HEADERS);
    assert_eq!(sheet.rows(), &ROWS.map(|row| row.map(str::to_string).to_vec()));
}

#[test]
fn workbook_sheets_are_read_in_order() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("setup.xlsx");

    let mut workbook = Workbook::new();
    workbook
        .add_worksheet()
        .set_name("General")
        .expect("sheet named")
        .write_string(0, 0, "Field")
        .expect("header written");
    workbook
        .add_worksheet()
        .set_name("Data_Providers")
        .expect("sheet named")
        .write_string(0, 0, "Name")
        .expect("header written");
    workbook.save(&path).expect("workbook saved");

    let document = read_document(&path).expect("workbook read");

    let names: Vec<&str> = document
        .sheets()
        .iter()
        .map(|sheet| sheet.name.as_str())
        .collect();
    assert_eq!(names, ["General", "Data_Providers"]);
}

#[test]
fn unsupported_suffix_is_rejected() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("contacts.pdf");
    fs::write(&path, "not a spreadsheet").expect("file written");

    let error = read_document(&path).expect_err("read should fail");
    assert!(matches!(error, SetupError::UnsupportedFormat(_)));
}
