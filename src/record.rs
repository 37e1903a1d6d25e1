// src/record.rs
//
// Output records, one shape per dataset. Field order here is the field order
// in the written JSON.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self { Side::Left => "Left", Side::Right => "Right" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CctldRecord {
    pub code: String,
    pub country: String,
    pub flag: String,
    pub explanation: String,
    pub notes: String,
    pub language: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrivingSideRecord {
    pub country: String,
    pub side: Side,
    pub flag: String,
    pub explanation: String,
    pub switched: bool,
}

/// Shared by telephone codes and vehicle codes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRecord {
    pub code: String,
    pub country: String,
    pub flag: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Cctld(CctldRecord),
    DrivingSide(DrivingSideRecord),
    TelephoneCode(CodeRecord),
    VehicleCode(CodeRecord),
}

impl Record {
    /// Dedup and sort key: the code for ccTLDs and vehicle codes, the country
    /// for driving sides and telephone codes.
    pub fn key(&self) -> &str {
        match self {
            Record::Cctld(r)         => &r.code,
            Record::DrivingSide(r)   => &r.country,
            Record::TelephoneCode(r) => &r.country,
            Record::VehicleCode(r)   => &r.code,
        }
    }

    pub fn country(&self) -> &str {
        match self {
            Record::Cctld(r)         => &r.country,
            Record::DrivingSide(r)   => &r.country,
            Record::TelephoneCode(r) |
            Record::VehicleCode(r)   => &r.country,
        }
    }

    pub fn flag(&self) -> &str {
        match self {
            Record::Cctld(r)         => &r.flag,
            Record::DrivingSide(r)   => &r.flag,
            Record::TelephoneCode(r) |
            Record::VehicleCode(r)   => &r.flag,
        }
    }
}
