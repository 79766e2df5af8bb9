//! Parsers for the auxiliary care tables keyed by disease.

use std::collections::BTreeMap;

use crate::core::types::{Disease, DoctorContact};
use crate::parsing::table::{parse_rows, ParseError, Row};

/// Disease -> ordered items (precautions, tablets, or reasons)
pub type ListTable = BTreeMap<Disease, Vec<String>>;

/// Disease -> referral record
pub type DoctorTable = BTreeMap<Disease, DoctorContact>;

/// Parse a list table (`disease,item1,item2,...`)
///
/// # Errors
///
/// Returns `ParseError::TooManyRows` if the row limit is exceeded.
pub fn parse_list_table(text: &str) -> Result<ListTable, ParseError> {
    Ok(list_table_from_rows(parse_rows(text)?))
}

/// Items accumulate across rows for the same disease. A row with no items
/// does not create an entry.
pub fn list_table_from_rows(rows: Vec<Row>) -> ListTable {
    let mut table = ListTable::new();
    for row in rows {
        if row.fields.is_empty() {
            continue;
        }
        table
            .entry(Disease::new(row.disease))
            .or_default()
            .extend(row.fields);
    }
    table
}

/// Parse a doctor table (`disease,doctorName,hospital,address`)
///
/// # Errors
///
/// Returns `ParseError::TooManyRows` if the row limit is exceeded.
pub fn parse_doctor_table(text: &str) -> Result<DoctorTable, ParseError> {
    Ok(doctor_table_from_rows(parse_rows(text)?))
}

/// Missing fields become empty strings; fields past the address are ignored.
/// Later rows for the same disease replace earlier ones.
pub fn doctor_table_from_rows(rows: Vec<Row>) -> DoctorTable {
    let mut table = DoctorTable::new();
    for row in rows {
        let mut fields = row.fields.into_iter();
        let contact = DoctorContact {
            doctor_name: fields.next().unwrap_or_default(),
            hospital: fields.next().unwrap_or_default(),
            address: fields.next().unwrap_or_default(),
        };
        table.insert(Disease::new(row.disease), contact);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_table_accumulates() {
        let table = parse_list_table("Flu,rest\nFlu,fluids\nCold,tea\n").unwrap();
        assert_eq!(table[&Disease::new("Flu")], vec!["rest", "fluids"]);
        assert_eq!(table[&Disease::new("Cold")], vec!["tea"]);
    }

    #[test]
    fn test_list_table_ignores_bare_disease_rows() {
        let table = parse_list_table("Flu\nCold,tea\n").unwrap();
        assert!(!table.contains_key(&Disease::new("Flu")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_list_table_trailing_comma_adds_no_item() {
        let table = parse_list_table("Flu,rest,\nCold,\n").unwrap();
        assert_eq!(table[&Disease::new("Flu")], vec!["rest"]);
        assert!(!table.contains_key(&Disease::new("Cold")));
    }

    #[test]
    fn test_doctor_table_later_rows_overwrite() {
        let table =
            parse_doctor_table("Flu,Dr. A,General,1 Main St\nFlu,Dr. B,Clinic,2 Side St\n")
                .unwrap();
        let contact = &table[&Disease::new("Flu")];
        assert_eq!(contact.doctor_name, "Dr. B");
        assert_eq!(contact.hospital, "Clinic");
        assert_eq!(contact.address, "2 Side St");
    }

    #[test]
    fn test_doctor_table_short_row_fills_empty() {
        let table = parse_doctor_table("Flu,Dr. A\n").unwrap();
        let contact = &table[&Disease::new("Flu")];
        assert_eq!(contact.doctor_name, "Dr. A");
        assert_eq!(contact.hospital, "");
        assert_eq!(contact.address, "");
    }
}
