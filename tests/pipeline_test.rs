use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tempfile::tempdir;

use memo_pipeline::pipeline::{FailurePolicy, Pipeline};
use memo_pipeline::sink::FsSink;
use memo_pipeline::source::CsvFileSource;

const PERSONS_CSV: &str = "\
Identifikatornummer;Nachname;Vorname;Geschlecht;Jugendlich;Geburtsdatum;Geburtsort;Freitext / Biografie
1;Gross;Adolf;männlich;nein;24.11.1892;Graz;Kaufmann in Graz.
2;Holz;Maria;weiblich;ja;;;
";

const EVENTS_CSV: &str = "\
Id;Titel;Personennummer;Typ;Beschreibung;Startdatum;Enddatum;Kategorie;Ort;Längengrad;Breitengrad
10;Tod von Adolf Gross;1;Tod;Ermordet.;29.08.1942;;Deportation, \"Shoah, Graz\";Auschwitz;19.2;50.03
11;Flucht;1, 2;Flucht;;;;;;;
";

fn write_sheets(dir: &Path, persons: &str, events: &str) -> Result<(PathBuf, PathBuf)> {
    let persons_path = dir.join("persons.csv");
    let events_path = dir.join("events.csv");
    fs::write(&persons_path, persons)?;
    fs::write(&events_path, events)?;
    Ok((persons_path, events_path))
}

fn pipeline_for(dir: &Path, persons: &str, events: &str) -> Result<(Pipeline, PathBuf)> {
    let (persons_path, events_path) = write_sheets(dir, persons, events)?;
    let output_root = dir.join("output");
    let pipeline = Pipeline::new(
        "memo".to_string(),
        Box::new(CsvFileSource::new(persons_path, events_path, b';')),
        Arc::new(FsSink::new(output_root.clone())),
    );
    Ok((pipeline, output_root))
}

#[test]
fn full_run_produces_complete_digital_objects() -> Result<()> {
    let dir = tempdir()?;
    let (pipeline, output_root) = pipeline_for(dir.path(), PERSONS_CSV, EVENTS_CSV)?;

    let summary = pipeline.run()?;

    assert_eq!(summary.persons_loaded, 2);
    assert_eq!(summary.events_loaded, 2);
    assert_eq!(summary.objects_written, 2);
    assert_eq!(summary.objects_failed, 0);
    assert_eq!(summary.rows_skipped, 0);
    assert_eq!(summary.link_warnings, 0);

    for object_id in ["memo.person.1", "memo.person.2"] {
        let folder = output_root.join(object_id);
        for file_name in ["DC.xml", "RDF.xml", "SEARCH.json", "object.csv", "datastreams.csv"] {
            assert!(
                folder.join(file_name).is_file(),
                "{object_id}/{file_name} missing"
            );
        }
    }
    Ok(())
}

#[test]
fn dublin_core_reflects_the_person() -> Result<()> {
    let dir = tempdir()?;
    let (pipeline, output_root) = pipeline_for(dir.path(), PERSONS_CSV, EVENTS_CSV)?;
    pipeline.run()?;

    let dc = fs::read_to_string(output_root.join("memo.person.1").join("DC.xml"))?;
    assert!(dc.contains("<dc:identifier>memo.person.1</dc:identifier>"));
    assert!(dc.contains("<dc:title>Adolf Gross</dc:title>"));
    assert!(dc.contains("<dc:date>1892-11-24T00:00:00Z</dc:date>"));
    assert!(!dc.contains("<dc:subject>"));

    let dc_youth = fs::read_to_string(output_root.join("memo.person.2").join("DC.xml"))?;
    assert!(dc_youth.contains("<dc:title>Maria Holz</dc:title>"));
    assert!(dc_youth.contains("<dc:subject>jugendlich</dc:subject>"));
    Ok(())
}

#[test]
fn rdf_links_persons_to_their_events() -> Result<()> {
    let dir = tempdir()?;
    let (pipeline, output_root) = pipeline_for(dir.path(), PERSONS_CSV, EVENTS_CSV)?;
    pipeline.run()?;

    let rdf = fs::read_to_string(output_root.join("memo.person.1").join("RDF.xml"))?;
    assert!(rdf.contains("rdf:about=\"https://gams.uni-graz.at/memo.person.1\""));
    assert!(rdf.contains("https://gams.uni-graz.at/memo.person.1/events/10"));
    assert!(rdf.contains("https://gams.uni-graz.at/memo.person.1/events/11"));
    assert!(rdf.contains(">19.2</wgs84_pos:lat>"));

    // Person 2 only takes part in the Flucht event
    let rdf = fs::read_to_string(output_root.join("memo.person.2").join("RDF.xml"))?;
    assert!(!rdf.contains("/events/10"));
    assert!(rdf.contains("https://gams.uni-graz.at/memo.person.2/events/11"));
    Ok(())
}

#[test]
fn search_document_carries_the_death_location_block() -> Result<()> {
    let dir = tempdir()?;
    let (pipeline, output_root) = pipeline_for(dir.path(), PERSONS_CSV, EVENTS_CSV)?;
    pipeline.run()?;

    let search = fs::read_to_string(output_root.join("memo.person.1").join("SEARCH.json"))?;
    let document: Value = serde_json::from_str(&search)?;
    assert_eq!(document["id"], "memo.person.1");
    assert_eq!(document["sys_entityTitle"], "Adolf Gross");
    assert_eq!(document["sys_entityTypes"], serde_json::json!(["person"]));
    assert_eq!(
        document["sys-entityLongLat"],
        serde_json::json!([19.2, 50.03])
    );
    assert_eq!(
        document["sys_entityTags"],
        serde_json::json!(["Deportation", "\"Shoah, Graz\""])
    );
    assert_eq!(
        document["sys-locationLabels"],
        serde_json::json!(["Auschwitz"])
    );

    // Person 2 has no death event, so no location block at all
    let search = fs::read_to_string(output_root.join("memo.person.2").join("SEARCH.json"))?;
    let document: Value = serde_json::from_str(&search)?;
    assert!(document.get("sys-entityLongLat").is_none());
    assert!(document.get("sys_entityTags").is_none());
    Ok(())
}

#[test]
fn datastreams_manifest_lists_the_rendered_files() -> Result<()> {
    let dir = tempdir()?;
    let (pipeline, output_root) = pipeline_for(dir.path(), PERSONS_CSV, EVENTS_CSV)?;
    pipeline.run()?;

    let datastreams =
        fs::read_to_string(output_root.join("memo.person.1").join("datastreams.csv"))?;
    let lines: Vec<&str> = datastreams.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("\"DC.xml\",\"DC.xml\",\"DC.xml\",\"application/xml\""));
    assert!(lines[2].starts_with("\"RDF.xml\""));
    assert!(lines[3].starts_with("\"SEARCH.json\",\"SEARCH.json\",\"SEARCH.json\",\"text/plain\""));
    assert!(!datastreams.contains("object.csv"));
    Ok(())
}

#[test]
fn object_manifest_is_fully_quoted() -> Result<()> {
    let dir = tempdir()?;
    let (pipeline, output_root) = pipeline_for(dir.path(), PERSONS_CSV, EVENTS_CSV)?;
    pipeline.run()?;

    let object = fs::read_to_string(output_root.join("memo.person.1").join("object.csv"))?;
    let lines: Vec<&str> = object.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("\"recid\",\"title\",\"project\""));
    assert!(lines[1].starts_with("\"memo.person.1\",\"Adolf Gross\",\"memo\",\"Kaufmann in Graz.\""));
    Ok(())
}

#[test]
fn invalid_rows_are_skipped_and_reported() -> Result<()> {
    let persons = "\
Identifikatornummer;Nachname;Geschlecht;Geburtsdatum
1;Gross;männlich;1892-11-24
2;Holz;weiblich;
";
    let dir = tempdir()?;
    let (pipeline, output_root) = pipeline_for(dir.path(), persons, EVENTS_CSV)?;

    let summary = pipeline.run()?;

    assert_eq!(summary.persons_loaded, 1);
    assert_eq!(summary.rows_skipped, 1);
    assert!(summary.row_errors[0].contains("malformed date"));
    assert!(!output_root.join("memo.person.1").exists());
    assert!(output_root.join("memo.person.2").is_dir());
    Ok(())
}

#[test]
fn strict_mode_aborts_instead_of_skipping() -> Result<()> {
    let persons = "\
Identifikatornummer;Nachname;Geschlecht;Geburtsdatum
1;Gross;männlich;1892-11-24
";
    let dir = tempdir()?;
    let (pipeline, output_root) = pipeline_for(dir.path(), persons, EVENTS_CSV)?;
    let pipeline = pipeline.with_policy(FailurePolicy::Strict);

    assert!(pipeline.run().is_err());
    assert!(!output_root.exists());
    Ok(())
}

#[test]
fn dangling_person_references_warn_but_do_not_fail() -> Result<()> {
    let events = "\
Id;Personennummer
10;9
";
    let dir = tempdir()?;
    let (pipeline, _) = pipeline_for(dir.path(), PERSONS_CSV, events)?;

    let summary = pipeline.run()?;

    assert_eq!(summary.link_warnings, 1);
    assert_eq!(summary.objects_written, 2);
    Ok(())
}

#[test]
fn check_reports_without_writing() -> Result<()> {
    let dir = tempdir()?;
    let (pipeline, output_root) = pipeline_for(dir.path(), PERSONS_CSV, EVENTS_CSV)?;

    let summary = pipeline.check()?;

    assert_eq!(summary.persons_loaded, 2);
    assert_eq!(summary.events_loaded, 2);
    assert_eq!(summary.objects_written, 0);
    assert!(!output_root.exists());
    Ok(())
}
