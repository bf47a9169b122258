// ==========================================
// Test data builders - integration tests
// ==========================================
// Builds repairs-sheet / recut-list rows and writes them as CSV
// files laid out the way the production exports are
// ==========================================

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub const REPAIR_HEADERS: &[&str] = &[
    "Date",
    "Repair Discovered",
    "SKU-Colorway-Size",
    "PR#",
    "Total Qty",
    "Repair Qty",
    "Repair Time (min)",
    "Recut Qty",
    "Fail Qty",
    "Reason Code",
    "Manager",
    "SMO/PA",
    "CMO",
];

pub const RECUT_HEADERS: &[&str] = &[
    "CODE",
    "SKU",
    "Material",
    "QTY",
    "Operator/Order#",
    "PA",
    "Date",
    "Done",
    "scrap?",
];

fn csv_cell(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| csv_cell(c))
        .collect::<Vec<_>>()
        .join(",")
}

// ==========================================
// Repairs-sheet row builder
// ==========================================

#[derive(Debug, Clone)]
pub struct RepairRowBuilder {
    date: String,
    discovered: String,
    sku: String,
    order_number: String,
    total_qty: String,
    repair_qty: String,
    repair_time_min: String,
    recut_qty: String,
    fail_qty: String,
    reason_code: String,
    manager: String,
    operator: String,
    cutting_operator: String,
}

impl RepairRowBuilder {
    pub fn new(date: &str, sku: &str) -> Self {
        Self {
            date: date.to_string(),
            discovered: "SEWING".to_string(),
            sku: sku.to_string(),
            order_number: String::new(),
            total_qty: String::new(),
            repair_qty: "0".to_string(),
            repair_time_min: "0".to_string(),
            recut_qty: "0".to_string(),
            fail_qty: "0".to_string(),
            reason_code: String::new(),
            manager: String::new(),
            operator: String::new(),
            cutting_operator: String::new(),
        }
    }

    pub fn discovered(mut self, location: &str) -> Self {
        self.discovered = location.to_string();
        self
    }

    pub fn order(mut self, order_number: &str) -> Self {
        self.order_number = order_number.to_string();
        self
    }

    pub fn total(mut self, qty: i64) -> Self {
        self.total_qty = qty.to_string();
        self
    }

    pub fn repaired(mut self, qty: i64, minutes: i64) -> Self {
        self.repair_qty = qty.to_string();
        self.repair_time_min = minutes.to_string();
        self
    }

    pub fn recut(mut self, qty: i64) -> Self {
        self.recut_qty = qty.to_string();
        self
    }

    pub fn failed(mut self, qty: i64) -> Self {
        self.fail_qty = qty.to_string();
        self
    }

    /// Raw cell text, for malformed-input cases
    pub fn raw_repair_qty(mut self, raw: &str) -> Self {
        self.repair_qty = raw.to_string();
        self
    }

    pub fn code(mut self, code: &str) -> Self {
        self.reason_code = code.to_string();
        self
    }

    pub fn manager(mut self, name: &str) -> Self {
        self.manager = name.to_string();
        self
    }

    pub fn operator(mut self, name: &str) -> Self {
        self.operator = name.to_string();
        self
    }

    pub fn cutting_operator(mut self, name: &str) -> Self {
        self.cutting_operator = name.to_string();
        self
    }

    pub fn to_csv_line(&self) -> String {
        csv_line(&[
            self.date.clone(),
            self.discovered.clone(),
            self.sku.clone(),
            self.order_number.clone(),
            self.total_qty.clone(),
            self.repair_qty.clone(),
            self.repair_time_min.clone(),
            self.recut_qty.clone(),
            self.fail_qty.clone(),
            self.reason_code.clone(),
            self.manager.clone(),
            self.operator.clone(),
            self.cutting_operator.clone(),
        ])
    }
}

// ==========================================
// Recut-list row builder
// ==========================================

#[derive(Debug, Clone)]
pub struct RecutRowBuilder {
    code: String,
    sku: String,
    material: String,
    qty: String,
    operator: String,
    handler: String,
    date: String,
    done: String,
    scrapped: String,
}

impl RecutRowBuilder {
    pub fn new(date: &str, sku: &str, code: &str) -> Self {
        Self {
            code: code.to_string(),
            sku: sku.to_string(),
            material: String::new(),
            qty: "1".to_string(),
            operator: String::new(),
            handler: String::new(),
            date: date.to_string(),
            done: String::new(),
            scrapped: String::new(),
        }
    }

    pub fn material(mut self, material: &str) -> Self {
        self.material = material.to_string();
        self
    }

    pub fn qty(mut self, qty: i64) -> Self {
        self.qty = qty.to_string();
        self
    }

    pub fn operator(mut self, name: &str) -> Self {
        self.operator = name.to_string();
        self
    }

    pub fn handler(mut self, name: &str) -> Self {
        self.handler = name.to_string();
        self
    }

    pub fn done(mut self, flag: &str) -> Self {
        self.done = flag.to_string();
        self
    }

    pub fn scrapped(mut self, flag: &str) -> Self {
        self.scrapped = flag.to_string();
        self
    }

    pub fn to_csv_line(&self) -> String {
        csv_line(&[
            self.code.clone(),
            self.sku.clone(),
            self.material.clone(),
            self.qty.clone(),
            self.operator.clone(),
            self.handler.clone(),
            self.date.clone(),
            self.done.clone(),
            self.scrapped.clone(),
        ])
    }
}

// ==========================================
// CSV fixture on disk
// ==========================================

/// Two CSV exports in a temporary directory (removed on drop)
pub struct CsvFixture {
    _dir: TempDir,
    pub repairs_path: PathBuf,
    pub recuts_path: PathBuf,
}

impl CsvFixture {
    pub fn write(repairs: &[RepairRowBuilder], recuts: &[RecutRowBuilder]) -> Self {
        Self::write_with_preamble(&[], repairs, recuts)
    }

    /// Title/notes rows above the repairs header, as in the real sheet
    pub fn write_with_preamble(
        preamble: &[&str],
        repairs: &[RepairRowBuilder],
        recuts: &[RecutRowBuilder],
    ) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let repairs_path = dir.path().join("repairs.csv");
        let recuts_path = dir.path().join("recuts.csv");

        let mut repair_lines: Vec<String> = preamble.iter().map(|l| l.to_string()).collect();
        repair_lines.push(REPAIR_HEADERS.join(","));
        repair_lines.extend(repairs.iter().map(RepairRowBuilder::to_csv_line));
        fs::write(&repairs_path, repair_lines.join("\n")).expect("failed to write repairs csv");

        let mut recut_lines = vec![RECUT_HEADERS.join(",")];
        recut_lines.extend(recuts.iter().map(RecutRowBuilder::to_csv_line));
        fs::write(&recuts_path, recut_lines.join("\n")).expect("failed to write recuts csv");

        Self {
            _dir: dir,
            repairs_path,
            recuts_path,
        }
    }
}

// ==========================================
// A small realistic month
// ==========================================

/// Two weeks of January 2025 across three product families
pub fn january_repairs() -> Vec<RepairRowBuilder> {
    vec![
        RepairRowBuilder::new("2025-01-06", "TRK100-BK-L")
            .order("PR1001")
            .total(40)
            .repaired(3, 30)
            .failed(1)
            .code("A1A")
            .manager("WILL")
            .operator("jsmith")
            .cutting_operator("mlee"),
        RepairRowBuilder::new("2025-01-07", "TRK100-CB-L")
            .discovered("QC")
            .order("PR1002")
            .total(20)
            .repaired(2, 20)
            .code("A1A")
            .operator("JSMITH"),
        RepairRowBuilder::new("2025-01-08", "BAG200-BK")
            .order("PR1003")
            .total(10)
            .repaired(4, 60)
            .failed(2)
            .code("B2")
            .operator("akhan"),
        RepairRowBuilder::new("2025-01-14", "BAG200-MC")
            .discovered("qc")
            .repaired(1, 5)
            .code("S3")
            .operator("akhan"),
        RepairRowBuilder::new("2025-01-15", "PI-CB")
            .repaired(2, 10)
            .code("C1")
            .operator("bwong"),
    ]
}

pub fn january_recuts() -> Vec<RecutRowBuilder> {
    vec![
        RecutRowBuilder::new("2025-01-06", "TRK100-BK-L", "B: Wrong Material Cut")
            .material("NYLON")
            .qty(3)
            .operator("mlee")
            .done("x"),
        RecutRowBuilder::new("2025-01-09", "BAG200-BK", "A: SMO Error")
            .material("CANVAS")
            .qty(2)
            .done("yes"),
        RecutRowBuilder::new("2025-01-13", "BAG200-BK", "A*")
            .material("CANVAS")
            .qty(1),
        RecutRowBuilder::new("2025-01-15", "TRK100-CB-L", "C")
            .material("NYLON")
            .qty(5)
            .scrapped("maybe"),
    ]
}
