//! Bills for individual reports and the billing ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::words::{amount_to_words, AmountError};
use crate::models::{Gender, Report};

/// Description printed for the collection fee line.
pub const COLLECTION_FEE_LABEL: &str = "COLLECTION FEE";

/// A tax invoice for one report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    /// Bill-to block
    pub metadata: BillMetadata,
    /// Test lines followed by the collection fee
    pub lines: Vec<BillLine>,
    /// Sum of all line amounts
    pub total: f64,
    /// Total spelled out (e.g. "Six Hundred Only")
    pub amount_in_words: String,
}

/// Header and bill-to block, copied from the report snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillMetadata {
    /// Issuing lab
    pub lab_name: String,
    pub report_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: Gender,
    pub referring_doctor: String,
    pub date: NaiveDate,
}

/// Single invoice line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillLine {
    /// 1-based position
    pub index: usize,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub amount: f64,
}

impl Bill {
    /// Build the invoice for a report, adding the collection fee as the last line.
    pub fn from_report(
        report: &Report,
        lab_name: &str,
        collection_fee: f64,
    ) -> Result<Self, AmountError> {
        let mut lines: Vec<BillLine> = report
            .tests
            .iter()
            .enumerate()
            .map(|(i, test)| BillLine {
                index: i + 1,
                description: test.test_name.clone(),
                quantity: 1,
                unit_price: test.price,
                amount: test.price,
            })
            .collect();

        lines.push(BillLine {
            index: lines.len() + 1,
            description: COLLECTION_FEE_LABEL.to_string(),
            quantity: 1,
            unit_price: collection_fee,
            amount: collection_fee,
        });

        let total: f64 = lines.iter().map(|l| l.amount).sum();
        let amount_in_words = amount_to_words(total)?;

        Ok(Self {
            metadata: BillMetadata {
                lab_name: lab_name.to_string(),
                report_id: report.id.clone(),
                patient_id: report.patient_id.clone(),
                patient_name: report.patient_name.clone(),
                patient_age: report.patient_age,
                patient_gender: report.patient_gender,
                referring_doctor: report.referring_doctor.clone(),
                date: report.date,
            },
            lines,
            total,
            amount_in_words,
        })
    }

    /// Total quantity across lines (printed in the "Total" row).
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// File name used when the bill is printed.
    pub fn file_name(&self) -> String {
        format!("Bill-{}-{}.pdf", self.metadata.report_id, self.metadata.patient_id)
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("report_id,patient_id,index,description,quantity,unit_price,amount\n");

        for line in &self.lines {
            csv.push_str(&format!(
                "{},{},{},{},{},{:.2},{:.2}\n",
                escape_csv(&self.metadata.report_id),
                escape_csv(&self.metadata.patient_id),
                line.index,
                escape_csv(&line.description),
                line.quantity,
                line.unit_price,
                line.amount,
            ));
        }

        csv
    }
}

/// One row of the billing dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub report_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub date: NaiveDate,
    /// Sum of test prices, without the collection fee
    pub total: f64,
}

impl LedgerEntry {
    fn matches(&self, term: &str) -> bool {
        self.patient_name.to_lowercase().contains(term)
            || self.patient_id.to_lowercase().contains(term)
            || self.report_id.to_lowercase().contains(term)
    }
}

/// All bills, newest first, with revenue totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingLedger {
    pub entries: Vec<LedgerEntry>,
    pub total_revenue: f64,
}

impl BillingLedger {
    pub fn from_reports(reports: &[Report]) -> Self {
        let mut entries: Vec<LedgerEntry> = reports
            .iter()
            .map(|r| LedgerEntry {
                report_id: r.id.clone(),
                patient_id: r.patient_id.clone(),
                patient_name: r.patient_name.clone(),
                date: r.date,
                total: r.tests_total(),
            })
            .collect();

        // Stable sort keeps creation order within a day.
        entries.sort_by(|a, b| b.date.cmp(&a.date));

        let total_revenue = entries.iter().map(|e| e.total).sum();
        Self {
            entries,
            total_revenue,
        }
    }

    /// Entries whose patient name, patient id or report id contains `term`
    /// (case-insensitive). An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&LedgerEntry> {
        let term = term.trim().to_lowercase();
        self.entries.iter().filter(|e| e.matches(&term)).collect()
    }

    /// Data for the bill-amount chart: the first `limit` matching entries,
    /// oldest first.
    pub fn chart_window(&self, term: &str, limit: usize) -> Vec<&LedgerEntry> {
        let mut window: Vec<&LedgerEntry> = self.search(term).into_iter().take(limit).collect();
        window.reverse();
        window
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("report_id,patient_id,patient_name,date,total\n");

        for entry in &self.entries {
            csv.push_str(&format!(
                "{},{},{},{},{:.2}\n",
                escape_csv(&entry.report_id),
                escape_csv(&entry.patient_id),
                escape_csv(&entry.patient_name),
                entry.date,
                entry.total,
            ));
        }

        csv
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
