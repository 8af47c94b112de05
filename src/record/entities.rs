use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Attribute key that carries the test number of a result record
pub const TEST_NUM: &str = "TEST_NUM";

/// STDF V4 record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StdfRecordType {
    /// File Attributes Record
    Far,
    /// Audit Trail Record
    Atr,
    /// Master Information Record
    Mir,
    /// Master Results Record
    Mrr,
    /// Part Count Record
    Pcr,
    /// Hardware Bin Record
    Hbr,
    /// Software Bin Record
    Sbr,
    /// Pin Map Record
    Pmr,
    /// Pin Group Record
    Pgr,
    /// Pin List Record
    Plr,
    /// Retest Data Record
    Rdr,
    /// Site Description Record
    Sdr,
    /// Wafer Information Record
    Wir,
    /// Wafer Results Record
    Wrr,
    /// Wafer Configuration Record
    Wcr,
    /// Part Information Record
    Pir,
    /// Part Results Record
    Prr,
    /// Test Synopsis Record
    Tsr,
    /// Parametric Test Record
    Ptr,
    /// Multiple-Result Parametric Record
    Mpr,
    /// Functional Test Record
    Ftr,
    /// Begin Program Section Record
    Bps,
    /// End Program Section Record
    Eps,
    /// Generic Data Record
    Gdr,
    /// Datalog Text Record
    Dtr,
}

/// Record types that carry the outcome of a single test execution
pub const STDF_RESULT_RECORDS: [StdfRecordType; 3] =
    [StdfRecordType::Ptr, StdfRecordType::Mpr, StdfRecordType::Ftr];

impl StdfRecordType {
    pub fn is_result(&self) -> bool {
        STDF_RESULT_RECORDS.contains(self)
    }

    /// The three letter mnemonic, e.g. "PTR"
    pub fn mnemonic(&self) -> &'static str {
        match self {
            StdfRecordType::Far => "FAR",
            StdfRecordType::Atr => "ATR",
            StdfRecordType::Mir => "MIR",
            StdfRecordType::Mrr => "MRR",
            StdfRecordType::Pcr => "PCR",
            StdfRecordType::Hbr => "HBR",
            StdfRecordType::Sbr => "SBR",
            StdfRecordType::Pmr => "PMR",
            StdfRecordType::Pgr => "PGR",
            StdfRecordType::Plr => "PLR",
            StdfRecordType::Rdr => "RDR",
            StdfRecordType::Sdr => "SDR",
            StdfRecordType::Wir => "WIR",
            StdfRecordType::Wrr => "WRR",
            StdfRecordType::Wcr => "WCR",
            StdfRecordType::Pir => "PIR",
            StdfRecordType::Prr => "PRR",
            StdfRecordType::Tsr => "TSR",
            StdfRecordType::Ptr => "PTR",
            StdfRecordType::Mpr => "MPR",
            StdfRecordType::Ftr => "FTR",
            StdfRecordType::Bps => "BPS",
            StdfRecordType::Eps => "EPS",
            StdfRecordType::Gdr => "GDR",
            StdfRecordType::Dtr => "DTR",
        }
    }
}

impl fmt::Display for StdfRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// One key/value field of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordAttribute {
    pub key: String,
    pub value: Value,
}

impl RecordAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A decoded STDF record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdfRecord {
    #[serde(rename = "type")]
    pub record_type: StdfRecordType,
    #[serde(default)]
    pub values: Vec<RecordAttribute>,
}

impl StdfRecord {
    pub fn new(record_type: StdfRecordType, values: Vec<RecordAttribute>) -> Self {
        Self {
            record_type,
            values,
        }
    }

    /// Check if this record carries a test execution outcome
    pub fn is_result_record(&self) -> bool {
        self.record_type.is_result()
    }

    /// All test numbers this record carries
    ///
    /// Values that are not non-negative integers within `u32` are skipped.
    pub fn test_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.values
            .iter()
            .filter(|a| a.key == TEST_NUM)
            .filter_map(|a| a.value.as_u64())
            .filter_map(|n| u32::try_from(n).ok())
    }

    /// The first usable test number, if any
    pub fn test_number(&self) -> Option<u32> {
        self.test_numbers().next()
    }
}

/// Build a parametric test record with the given test number
pub fn create_ptr_record(test_num: u32, result: f64) -> StdfRecord {
    StdfRecord::new(
        StdfRecordType::Ptr,
        vec![
            RecordAttribute::new(TEST_NUM, test_num),
            RecordAttribute::new("RESULT", result),
        ],
    )
}
