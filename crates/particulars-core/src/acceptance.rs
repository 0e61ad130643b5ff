//! Acceptance table for depositor extraction.
//!
//! A fixed list of narrations with the depositor name the engine must return,
//! compared by exact string equality.

use serde::Serialize;

use crate::depositor::extract_depositor;

/// One narration with its expected depositor.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AcceptanceCase {
    pub description: &'static str,
    pub input: &'static str,
    pub expected: &'static str,
}

/// Outcome of running one case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub case: AcceptanceCase,
    pub actual: String,
    pub passed: bool,
}

pub const CASES: &[AcceptanceCase] = &[
    AcceptanceCase {
        description: "MPAY transaction with UPITRTR identifier",
        input: "MPAYUPITRTR5222741 19801 NAVEENKUMARSBINXXX30 522249979249/10-08-25 12:25:30",
        expected: "NAVEENKUMAR",
    },
    AcceptanceCase {
        description: "MPAY transaction with space in customer name",
        input: "MPAYUPITRTR123456 5000 HARISH SINGHPUNBXXX25 987654321/15-08-25 14:30:45",
        expected: "HARISH SINGH",
    },
    AcceptanceCase {
        description: "UPI transaction",
        input: "UPITRTR987654 2000 RAHUL KUMARUCBAXXX12 456789123/20-08-25 10:15:20",
        expected: "RAHUL KUMAR",
    },
    AcceptanceCase {
        description: "Empty narration",
        input: "",
        expected: "Unknown Customer",
    },
    AcceptanceCase {
        description: "Digits only",
        input: "1234567890",
        expected: "Unknown Customer",
    },
    AcceptanceCase {
        description: "No keyword or terminator",
        input: "CASH DEPOSIT",
        expected: "CASH DEPOSIT",
    },
];

/// Run every acceptance case.
pub fn run_cases() -> Vec<CaseOutcome> {
    CASES
        .iter()
        .map(|case| {
            let actual = extract_depositor(case.input);
            CaseOutcome {
                case: *case,
                passed: actual == case.expected,
                actual,
            }
        })
        .collect()
}
