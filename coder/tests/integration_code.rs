use soc_coder::{
    build_reference_index, code_file, load_cached_index, write_index_cache, CodeOptions,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_reference(dir: &Path) -> (PathBuf, PathBuf) {
    let occ = dir.join("occupation_data.txt");
    let alt = dir.join("alternate_titles.txt");
    fs::write(
        &occ,
        "O*NET-SOC Code\tTitle\n\
         29-1141.00\tRegistered Nurses\n\
         15-1252.00\tSoftware Developers\n",
    )
    .unwrap();
    fs::write(
        &alt,
        "O*NET-SOC Code\tAlternate Title\n\
         15-1252.00\tSoftware Engineer\n\
         29-1141.00\tRN\n",
    )
    .unwrap();
    (occ, alt)
}

fn options(title_column: &str) -> CodeOptions {
    CodeOptions {
        title_column: title_column.to_string(),
        cutoff: 80.0,
        title_from_text: false,
        pseudo_tokens: 6,
        keep_unmatched: false,
    }
}

fn read_rows(path: &Path) -> (csv::StringRecord, Vec<csv::StringRecord>) {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    let rows = rdr.records().map(|r| r.unwrap()).collect();
    (headers, rows)
}

fn field<'a>(headers: &csv::StringRecord, row: &'a csv::StringRecord, name: &str) -> &'a str {
    let idx = headers.iter().position(|h| h == name).unwrap();
    row.get(idx).unwrap()
}

#[test]
fn codes_a_batch_and_drops_unmatched_rows() {
    let dir = tempdir().unwrap();
    let (occ, alt) = write_reference(dir.path());
    let infile = dir.path().join("jobs.csv");
    fs::write(
        &infile,
        "id,job_title\n1,Registered Nurse\n2,Sr. Software Engineer\n3,Poet\n",
    )
    .unwrap();
    let outfile = dir.path().join("jobs_soc.csv");

    let index = build_reference_index(&occ, &alt).unwrap();
    let report = code_file(&index, &infile, &outfile, &options("job_title")).unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.matched, 2);

    let (headers, rows) = read_rows(&outfile);
    assert_eq!(rows.len(), 2);
    assert_eq!(field(&headers, &rows[0], "soc6"), "29-1141.00");
    assert_eq!(field(&headers, &rows[0], "soc_broad"), "29-1");
    assert_eq!(field(&headers, &rows[0], "soc_major"), "29");
    assert_eq!(field(&headers, &rows[1], "soc6"), "15-1252.00");
    assert_eq!(field(&headers, &rows[1], "id"), "2");
}

#[test]
fn keeps_unmatched_rows_when_asked() {
    let dir = tempdir().unwrap();
    let (occ, alt) = write_reference(dir.path());
    let infile = dir.path().join("jobs.csv");
    fs::write(&infile, "id,job_title\n1,Registered Nurse\n2,Poet\n").unwrap();
    let outfile = dir.path().join("jobs_soc.csv");

    let index = build_reference_index(&occ, &alt).unwrap();
    let mut opts = options("job_title");
    opts.keep_unmatched = true;
    code_file(&index, &infile, &outfile, &opts).unwrap();

    let (headers, rows) = read_rows(&outfile);
    assert_eq!(rows.len(), 2);
    assert_eq!(field(&headers, &rows[1], "id"), "2");
    assert_eq!(field(&headers, &rows[1], "soc6"), "");
    assert_eq!(field(&headers, &rows[1], "soc_broad"), "");
    assert_eq!(field(&headers, &rows[1], "soc_major"), "");
}

#[test]
fn derives_pseudo_titles_from_text() {
    let dir = tempdir().unwrap();
    let (occ, alt) = write_reference(dir.path());
    let infile = dir.path().join("resumes.csv");
    fs::write(
        &infile,
        "id,resume_text\n\
         1,Registered Nurse with ten years of acute care experience\n\
         2,I enjoy long walks and writing poetry about the sea at dusk\n",
    )
    .unwrap();
    let outfile = dir.path().join("resumes_soc.csv");

    let index = build_reference_index(&occ, &alt).unwrap();
    let mut opts = options("resume_text");
    opts.title_from_text = true;
    let report = code_file(&index, &infile, &outfile, &opts).unwrap();

    assert_eq!(report.matched, 1);
    let (headers, rows) = read_rows(&outfile);
    assert_eq!(rows.len(), 1);
    assert_eq!(field(&headers, &rows[0], "soc6"), "29-1141.00");
}

#[test]
fn missing_title_column_is_an_error() {
    let dir = tempdir().unwrap();
    let (occ, alt) = write_reference(dir.path());
    let infile = dir.path().join("jobs.csv");
    fs::write(&infile, "id,headline\n1,Registered Nurse\n").unwrap();
    let outfile = dir.path().join("jobs_soc.csv");

    let index = build_reference_index(&occ, &alt).unwrap();
    let err = code_file(&index, &infile, &outfile, &options("job_title")).unwrap_err();
    assert!(err.to_string().contains("job_title"));
}

#[test]
fn cache_roundtrip_preserves_the_index() {
    let dir = tempdir().unwrap();
    let (occ, alt) = write_reference(dir.path());
    let cache = dir.path().join("index");

    let built = build_reference_index(&occ, &alt).unwrap();
    write_index_cache(&built, &cache).unwrap();
    let loaded = load_cached_index(&cache).unwrap();

    assert_eq!(built.entries(), loaded.entries());
}
