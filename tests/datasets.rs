// tests/datasets.rs
//
// End-to-end extraction per dataset over small inline pages shaped like the
// real source tables.
use geo_scrape::config::options::DatasetKind;
use geo_scrape::engine::{extract, Strategy};
use geo_scrape::error::ExtractError;
use geo_scrape::record::{Record, Side};
use geo_scrape::specs::spec_for;

const FLAG: &str = r#"<img alt="" src="//upload.wikimedia.org/wikipedia/commons/thumb/1/19/Flag_of_Andorra.svg/23px-Flag_of_Andorra.svg.png" width="23">"#;

fn cctld_page() -> String {
    format!(r##"
<html><body>
<table class="wikitable"><tr><th>Name</th><th>Country</th></tr>
<tr><td>.example</td><td>Legend</td></tr></table>

<table class="wikitable sortable">
<tr><th>Name</th><th>Entity</th><th>Explanation</th><th>Notes</th></tr>
<tr><td><a href="/wiki/.ad">.ad</a></td><td><span class="flagicon">{FLAG}</span> <a href="/wiki/Andorra">Andorra</a></td>
    <td>Named for <a href="/wiki/Andorra" title="Andorra">Andorra</a>.</td>
    <td>Local trademark required.<sup class="reference"><a href="#cite-3">[3]</a></sup></td></tr>
<tr><td>.AE</td><td>United Arab Emirates</td><td>Emirates</td><td></td></tr>
<tr><td>.ad</td><td>Duplicate Andorra</td><td></td><td></td></tr>
<tr><td>ac</td><td>No leading dot</td><td></td><td></td></tr>
<tr><td>.a c</td><td>Whitespace</td><td></td><td></td></tr>
<tr><td>.zz</td><td>   </td><td></td><td></td></tr>
</table>
</body></html>"##)
}

#[test]
fn cctlds_full_row_rules() {
    let asm = extract(&cctld_page(), spec_for(DatasetKind::Cctlds)).unwrap();

    assert_eq!(asm.table_index, 1, "larger table wins over the legend");
    assert_eq!(asm.records.len(), 2);
    assert_eq!(asm.duplicates, 1);
    assert_eq!(asm.rejected, 3);

    let Record::Cctld(ad) = &asm.records[0] else { panic!("not a cctld record") };
    assert_eq!(ad.code, ".ad");
    assert_eq!(ad.country, "Andorra");
    assert_eq!(
        ad.flag,
        "https://upload.wikimedia.org/wikipedia/commons/thumb/1/19/Flag_of_Andorra.svg/320px-Flag_of_Andorra.svg.png"
    );
    assert_eq!(ad.explanation, "Named for Andorra.");
    assert_eq!(ad.notes, "Local trademark required.");
    assert_eq!(ad.language, "English");

    assert_eq!(asm.records[1].key(), ".ae");
    assert_eq!(asm.records[1].flag(), "");
}

#[test]
fn cctlds_fall_back_to_marker_cell() {
    let html = r#"<table><tr><th>Domain</th><th>Place</th></tr>
        <tr><td>.ad[1]</td><td>Andorra</td></tr>
        <tr><td>.af</td><td>Afghanistan</td></tr></table>"#;
    let asm = extract(html, spec_for(DatasetKind::Cctlds)).unwrap();
    assert_eq!(asm.strategy, Strategy::ContentSample);
    let keys: Vec<&str> = asm.records.iter().map(Record::key).collect();
    assert_eq!(keys, [".ad", ".af"]);
}

#[test]
fn driving_sides_classify_and_switch() {
    let html = r#"
<table>
<tr><th>Country</th><th>Side of road</th><th>Date of<br>switch</th></tr>
<tr><td><img src="//upload.wikimedia.org/x/Flag_of_Sweden.svg/20px-Flag_of_Sweden.svg.png"> Sweden</td><td>Right</td><td>1967<sup>[4]</sup></td></tr>
<tr><td>Japan</td><td>Left</td><td></td></tr>
<tr><td>Samoa</td><td>traffic keeps to the Left (changed 2009)</td><td>7 September 2009</td></tr>
<tr><td>Atlantis</td><td>unknown</td><td>never</td></tr>
<tr><td>Short row</td></tr>
</table>"#;
    let asm = extract(html, spec_for(DatasetKind::DrivingSides)).unwrap();
    assert_eq!(asm.rejected, 1);

    let rows: Vec<_> = asm
        .records
        .iter()
        .map(|r| match r {
            Record::DrivingSide(d) => (d.country.as_str(), d.side, d.switched, d.explanation.as_str()),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        rows,
        [
            ("Atlantis", Side::Right, false, "Drives on the <b>Right</b>."),
            ("Japan", Side::Left, false, "Drives on the <b>Left</b>."),
            ("Samoa", Side::Left, true, "Drives on the <b>Left</b>. (Switched in 2009)"),
            ("Sweden", Side::Right, true, "Drives on the <b>Right</b>. (Switched in 1967)"),
        ]
    );
    assert_eq!(
        asm.records[3].flag(),
        "https://upload.wikimedia.org/x/Flag_of_Sweden.svg/320px-Flag_of_Sweden.svg.png"
    );
}

#[test]
fn driving_sides_without_switch_column_never_switch() {
    let html = r#"<table><tr><th>Country</th><th>Traffic</th></tr>
        <tr><td>Ireland 1922</td><td>Left</td></tr></table>"#;
    let asm = extract(html, spec_for(DatasetKind::DrivingSides)).unwrap();
    let Record::DrivingSide(ie) = &asm.records[0] else { panic!() };
    assert!(!ie.switched);
    assert_eq!(ie.explanation, "Drives on the <b>Left</b>.");
}

#[test]
fn telephone_codes_pattern_and_order() {
    let html = r#"
<table><tr><th>Country, Territory or Service</th><th>Code</th></tr>
<tr><td>Zambia</td><td>260</td></tr>
<tr><td>Bahamas</td><td>+1 (242)</td></tr>
<tr><td>Nowhere</td><td>N/A</td></tr>
<tr><td>Afghanistan</td><td>+93<sup>[a]</sup></td></tr>
<tr><td>bhutan</td><td>+975</td></tr>
</table>"#;
    let asm = extract(html, spec_for(DatasetKind::TelephoneCodes)).unwrap();
    let pairs: Vec<(&str, &str)> = asm
        .records
        .iter()
        .map(|r| match r {
            Record::TelephoneCode(c) => (c.country.as_str(), c.code.as_str()),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        pairs,
        [("Afghanistan", "+93"), ("Bahamas", "+1 (242)"), ("bhutan", "+975"), ("Zambia", "+260")]
    );
    assert_eq!(asm.rejected, 1);
}

#[test]
fn telephone_codes_found_by_sample_row() {
    let html = r#"
<table><tr><th>Place</th><th>Dial</th></tr>
<tr><td>Afghanistan</td><td>+93</td></tr>
<tr><td>Albania</td><td>+355</td></tr></table>"#;
    let asm = extract(html, spec_for(DatasetKind::TelephoneCodes)).unwrap();
    assert_eq!(asm.strategy, Strategy::ContentSample);
    assert_eq!(asm.records.len(), 2);
}

#[test]
fn quoted_gt_in_link_attribute_stays_out_of_values() {
    let html = r#"
<table><tr><th>Country</th><th>Code</th></tr>
<tr><td><a href="/wiki/Andorra" title="Andorra > Europe">Andorra</a></td><td><a title='dial > 3'>+376</a></td></tr>
<tr><td>Albania</td><td>+355</td></tr></table>"#;
    let asm = extract(html, spec_for(DatasetKind::TelephoneCodes)).unwrap();
    let Record::TelephoneCode(ad) = &asm.records[1] else { panic!("wrong shape") };
    assert_eq!(ad.country, "Andorra");
    assert_eq!(ad.code, "+376");
}

#[test]
fn cctlds_marker_sees_through_encoded_citation() {
    let html = r#"
<table><tr><th>Domain</th><th>Place</th></tr>
<tr><td>.ad<span class="cite-bracket">&#91;</span>1<span class="cite-bracket">&#93;</span></td><td>Andorra</td></tr>
<tr><td>.ae</td><td>United Arab Emirates</td></tr></table>"#;
    let asm = extract(html, spec_for(DatasetKind::Cctlds)).unwrap();
    assert_eq!(asm.strategy, Strategy::ContentSample);
    let codes: Vec<&str> = asm.records.iter().map(Record::key).collect();
    assert_eq!(codes, [".ad", ".ae"]);
}

#[test]
fn exact_headers_see_through_encoded_citation() {
    let html = r#"
<table><tr><th>Code<sup>&#91;a&#93;</sup></th><th>Country&#160;&#91;2&#93;</th></tr>
<tr><td>AND</td><td>Andorra</td></tr>
<tr><td>B</td><td>Belgium</td></tr></table>"#;
    let asm = extract(html, spec_for(DatasetKind::VehicleCodes)).unwrap();
    assert_eq!(asm.strategy, Strategy::HeaderKeywords);
    assert_eq!(asm.records.len(), 2);
}

#[test]
fn spanned_tables_are_not_found() {
    let html = r#"
<table><tr><th>Country</th><th>Code</th></tr>
<tr><td rowspan="2">Afghanistan</td><td>+93</td></tr>
<tr><td>+93 7</td></tr></table>"#;
    let err = extract(html, spec_for(DatasetKind::TelephoneCodes)).unwrap_err();
    assert_eq!(err, ExtractError::TableNotFound { dataset: DatasetKind::TelephoneCodes, spanned: 1 });
}

#[test]
fn vehicle_codes_need_exact_headers() {
    let html = r#"
<table><tr><th>Country code</th><th>Country name</th></tr>
<tr><td>XX</td><td>Decoy</td></tr><tr><td>YY</td><td>Decoy</td></tr><tr><td>ZZ</td><td>Decoy</td></tr></table>
<table><tr><th>Code</th><th>Country</th><th>Since</th></tr>
<tr><td>UK (GB)</td><td><img src="//u/Flag_of_the_United_Kingdom.svg/23px-Flag.png"> United Kingdom</td><td>1910</td></tr>
<tr><td>AFG</td><td>Afghanistan</td><td>1971</td></tr>
</table>"#;
    let asm = extract(html, spec_for(DatasetKind::VehicleCodes)).unwrap();
    assert_eq!(asm.table_index, 1);
    let keys: Vec<&str> = asm.records.iter().map(Record::key).collect();
    assert_eq!(keys, ["AFG", "UK"]);
    assert_eq!(asm.records[1].country(), "United Kingdom");
    assert_eq!(asm.records[1].flag(), "https://u/Flag_of_the_United_Kingdom.svg/320px-Flag.png");
}

#[test]
fn no_table_at_all() {
    for kind in DatasetKind::ALL {
        let err = extract("<p>moved</p>", spec_for(kind)).unwrap_err();
        assert_eq!(err, ExtractError::TableNotFound { dataset: kind, spanned: 0 });
    }
}
