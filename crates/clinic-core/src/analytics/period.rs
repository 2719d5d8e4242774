//! Business intelligence for a reporting period.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{month_bounds, months_back, percent_of};
use crate::db::ClinicSnapshot;
use crate::models::{AppointmentStatus, Bill};

/// Number of treatments in the top-treatments table.
pub const TOP_TREATMENT_COUNT: usize = 5;

/// Months shown in the revenue trend, ending with the current one.
pub const TREND_MONTHS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    /// Start of the period containing `now`. A week is the last seven days;
    /// the others are calendar-aligned.
    pub fn start(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date();
        let first = match self {
            Period::Week => return now - Duration::days(7),
            Period::Month => today.with_day(1),
            Period::Quarter => today.with_day(1).and_then(|d| d.with_month(today.month0() / 3 * 3 + 1)),
            Period::Year => today.with_day(1).and_then(|d| d.with_month(1)),
        };
        first.unwrap_or(today).and_time(NaiveTime::MIN)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRevenue {
    pub name: String,
    pub count: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFigures {
    /// e.g. "Oct 26"
    pub month: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAnalytics {
    pub period: Period,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub profit: f64,
    /// Percentage of revenue
    pub profit_margin: f64,
    pub avg_transaction_value: f64,
    pub top_treatments: Vec<TreatmentRevenue>,
    pub monthly_trend: Vec<MonthlyFigures>,
    pub total_patients: usize,
    pub period_appointments: usize,
    pub completed_appointments: usize,
}

pub fn period_analytics(snapshot: &ClinicSnapshot, period: Period, now: NaiveDateTime) -> PeriodAnalytics {
    let start = period.start(now);
    let start_date = start.date();

    let bills: Vec<&Bill> = snapshot.bills.iter().filter(|b| b.local_time() >= start).collect();
    let total_revenue: f64 = bills.iter().map(|b| b.total).sum();
    let total_expenses: f64 = snapshot
        .expenses
        .iter()
        .filter(|e| e.date.and_time(NaiveTime::MIN) >= start)
        .map(|e| e.amount)
        .sum();
    let profit = total_revenue - total_expenses;

    let avg_transaction_value = if bills.is_empty() {
        0.0
    } else {
        total_revenue / bills.len() as f64
    };

    let appointments: Vec<_> = snapshot
        .appointments
        .iter()
        .filter(|a| a.date >= start_date)
        .collect();

    PeriodAnalytics {
        period,
        total_revenue,
        total_expenses,
        profit,
        profit_margin: percent_of(profit, total_revenue),
        avg_transaction_value,
        top_treatments: top_treatments(&bills),
        monthly_trend: monthly_trend(snapshot, now),
        total_patients: snapshot.patients.len(),
        period_appointments: appointments.len(),
        completed_appointments: appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .count(),
    }
}

/// Line items grouped by treatment name, highest revenue first. Ties keep
/// the order in which the treatment was first billed.
pub fn top_treatments(bills: &[&Bill]) -> Vec<TreatmentRevenue> {
    let mut grouped: Vec<TreatmentRevenue> = Vec::new();
    for item in bills.iter().flat_map(|b| &b.items) {
        match grouped.iter_mut().find(|t| t.name == item.treatment_name) {
            Some(entry) => {
                entry.count += item.quantity;
                entry.revenue += item.total;
            }
            None => grouped.push(TreatmentRevenue {
                name: item.treatment_name.clone(),
                count: item.quantity,
                revenue: item.total,
            }),
        }
    }
    grouped.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    grouped.truncate(TOP_TREATMENT_COUNT);
    grouped
}

/// Revenue, expenses and profit for the last six calendar months, oldest
/// first. Independent of the selected period.
pub fn monthly_trend(snapshot: &ClinicSnapshot, now: NaiveDateTime) -> Vec<MonthlyFigures> {
    let today = now.date();
    (0..TREND_MONTHS)
        .rev()
        .filter_map(|back| {
            let (year, month) = months_back(today, back);
            let (first, last) = month_bounds(year, month)?;
            let in_month = |d: chrono::NaiveDate| d >= first && d <= last;

            let revenue: f64 = snapshot
                .bills
                .iter()
                .filter(|b| in_month(b.local_time().date()))
                .map(|b| b.total)
                .sum();
            let expenses: f64 = snapshot
                .expenses
                .iter()
                .filter(|e| in_month(e.date))
                .map(|e| e.amount)
                .sum();

            Some(MonthlyFigures {
                month: first.format("%b %y").to_string(),
                revenue,
                expenses,
                profit: revenue - expenses,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillItem, PaymentStatus};
    use chrono::{Local, NaiveDate, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn bill_at(when: NaiveDateTime, items: Vec<BillItem>) -> Bill {
        let total = items.iter().map(|i| i.total).sum();
        Bill {
            id: crate::models::generate_id("BILL"),
            patient_id: "PAT-1".into(),
            date: Local.from_local_datetime(&when).single().unwrap().with_timezone(&Utc),
            items,
            subtotal: total,
            discount: 0.0,
            tax: 0.0,
            total,
            payment_method: "Cash".into(),
            payment_status: PaymentStatus::Paid,
            notes: String::new(),
        }
    }

    fn item(name: &str, quantity: u32, price: f64) -> BillItem {
        BillItem {
            treatment_id: name.into(),
            treatment_name: name.into(),
            quantity,
            price,
            total: price * f64::from(quantity),
        }
    }

    #[test]
    fn test_period_starts() {
        let now = at(2026, 8, 19);
        assert_eq!(Period::Week.start(now), at(2026, 8, 12));
        assert_eq!(Period::Month.start(now), at(2026, 8, 1).date().and_time(NaiveTime::MIN));
        assert_eq!(Period::Quarter.start(now), at(2026, 7, 1).date().and_time(NaiveTime::MIN));
        assert_eq!(Period::Year.start(now), at(2026, 1, 1).date().and_time(NaiveTime::MIN));

        // Quarter start on the 31st must not land on an invalid day
        let end_of_may = at(2026, 5, 31);
        assert_eq!(Period::Quarter.start(end_of_may), at(2026, 4, 1).date().and_time(NaiveTime::MIN));
    }

    #[test]
    fn test_empty_snapshot_has_no_division_by_zero() {
        for period in [Period::Week, Period::Month, Period::Quarter, Period::Year] {
            let report = period_analytics(&ClinicSnapshot::default(), period, at(2026, 10, 19));
            assert_eq!(report.total_revenue, 0.0);
            assert_eq!(report.profit_margin, 0.0);
            assert_eq!(report.avg_transaction_value, 0.0);
            assert!(report.top_treatments.is_empty());
            assert_eq!(report.monthly_trend.len(), 6);
        }
    }

    #[test]
    fn test_top_treatments_grouped_and_capped() {
        let bills = vec![
            bill_at(at(2026, 10, 2), vec![item("Scaling", 1, 3000.0), item("Filling", 2, 3500.0)]),
            bill_at(at(2026, 10, 3), vec![item("Scaling", 1, 3000.0), item("Extraction", 1, 2000.0)]),
            bill_at(at(2026, 10, 4), vec![
                item("X-Ray", 1, 500.0),
                item("Crown", 1, 25000.0),
                item("Whitening", 1, 20000.0),
            ]),
        ];
        let refs: Vec<&Bill> = bills.iter().collect();
        let top = top_treatments(&refs);

        assert_eq!(top.len(), 5);
        assert_eq!(top[0].name, "Crown");
        assert_eq!(top[2].name, "Filling");
        assert_eq!(top[2].count, 2);
        assert_eq!(top[3].name, "Scaling");
        assert_eq!(top[3].revenue, 6000.0);
        assert!(top.iter().all(|t| t.name != "X-Ray"));
    }

    #[test]
    fn test_top_treatment_ties_keep_first_seen() {
        let bills = vec![bill_at(at(2026, 10, 2), vec![item("B", 1, 100.0), item("A", 1, 100.0)])];
        let refs: Vec<&Bill> = bills.iter().collect();
        let top = top_treatments(&refs);
        assert_eq!(top[0].name, "B");
        assert_eq!(top[1].name, "A");
    }

    #[test]
    fn test_monthly_trend_labels() {
        let trend = monthly_trend(&ClinicSnapshot::default(), at(2026, 2, 10));
        let labels: Vec<&str> = trend.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, ["Sep 25", "Oct 25", "Nov 25", "Dec 25", "Jan 26", "Feb 26"]);
    }

    #[test]
    fn test_month_end_bill_counted() {
        let snapshot = ClinicSnapshot {
            bills: vec![bill_at(
                NaiveDate::from_ymd_opt(2026, 9, 30).unwrap().and_hms_opt(18, 45, 0).unwrap(),
                vec![item("Filling", 1, 3500.0)],
            )],
            ..Default::default()
        };
        let trend = monthly_trend(&snapshot, at(2026, 10, 19));
        assert_eq!(trend[4].month, "Sep 26");
        assert_eq!(trend[4].revenue, 3500.0);
        assert_eq!(trend[5].revenue, 0.0);
    }
}
