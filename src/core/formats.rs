//! Encoders and decoders for the three snapshot formats.
//!
//! * `txt`  - one comma-joined line per contact, no header, no escaping. A field
//!   containing a comma does not survive a round trip.
//! * `csv`  - header row plus one row per contact, standard quoting.
//! * `json` - pretty-printed array of objects keyed by field name.
//!
//! Decoders skip records that do not have exactly eight fields and report how
//! many were dropped.

use crate::domain::model::{Contact, StorageFormat};
use crate::utils::error::Result;

pub const CSV_HEADER: [&str; 8] = [
    "First Name",
    "Last Name",
    "Address",
    "City",
    "State",
    "Zip Code",
    "Phone Number",
    "Email",
];

#[derive(Debug, Default)]
pub struct Decoded {
    pub contacts: Vec<Contact>,
    pub skipped: usize,
}

pub fn encode(format: StorageFormat, contacts: &[Contact]) -> Result<Vec<u8>> {
    match format {
        StorageFormat::Txt => Ok(encode_txt(contacts)),
        StorageFormat::Csv => encode_csv(contacts),
        StorageFormat::Json => encode_json(contacts),
    }
}

pub fn decode(format: StorageFormat, data: &[u8]) -> Result<Decoded> {
    match format {
        StorageFormat::Txt => decode_txt(data),
        StorageFormat::Csv => decode_csv(data),
        StorageFormat::Json => decode_json(data),
    }
}

fn encode_txt(contacts: &[Contact]) -> Vec<u8> {
    let mut out = String::new();
    for contact in contacts {
        out.push_str(&contact.fields().join(","));
        out.push('\n');
    }
    out.into_bytes()
}

fn decode_txt(data: &[u8]) -> Result<Decoded> {
    let text = std::str::from_utf8(data)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let mut decoded = Decoded::default();
    for (line_no, line) in text.lines().enumerate() {
        match Contact::from_fields(line.split(',')) {
            Some(contact) => decoded.contacts.push(contact),
            None => {
                tracing::debug!("Skipping malformed txt line {}", line_no + 1);
                decoded.skipped += 1;
            }
        }
    }
    Ok(decoded)
}

fn encode_csv(contacts: &[Contact]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for contact in contacts {
        writer.write_record(contact.fields())?;
    }
    let data = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(data)
}

fn decode_csv(data: &[u8]) -> Result<Decoded> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let mut decoded = Decoded::default();
    for record in reader.records() {
        let record = record?;
        match Contact::from_fields(record.iter()) {
            Some(contact) => decoded.contacts.push(contact),
            None => {
                tracing::debug!(
                    "Skipping malformed csv row at line {}",
                    record.position().map(|p| p.line()).unwrap_or(0)
                );
                decoded.skipped += 1;
            }
        }
    }
    Ok(decoded)
}

fn encode_json(contacts: &[Contact]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(contacts)?)
}

fn decode_json(data: &[u8]) -> Result<Decoded> {
    let contacts: Vec<Contact> = serde_json::from_slice(data)?;
    Ok(Decoded {
        contacts,
        skipped: 0,
    })
}
