//! Реестр табов: единственное место, где ключ таба превращается в страницу.

use super::tab_labels::{
    parse_detail_key, AGENCY_DETAIL_PREFIX, DEBT_REPORT, EXPORT_HUB, ISSUE_DETAIL_PREFIX, ISSUE_NEW,
    PAYMENT_NEW, PROFILE, RECEIPT_DETAIL_PREFIX, RECEIPT_NEW, SALES_REPORT, SIMULATOR,
};
use crate::dashboards::{DebtReportDashboard, SalesReportDashboard};
use crate::domain::a001_agency::ui::details::AgencyDetails;
use crate::domain::a001_agency::ui::list::AgencyList;
use crate::domain::a003_receipt::ui::details::ReceiptDetails;
use crate::domain::a003_receipt::ui::list::ReceiptList;
use crate::domain::a003_receipt::ui::new::ReceiptNew;
use crate::domain::a004_distribution::ui::details::DistributionDetails;
use crate::domain::a004_distribution::ui::list::DistributionList;
use crate::domain::a004_distribution::ui::new::DistributionNew;
use crate::domain::a004_distribution::ui::simulator::DistributionSimulator;
use crate::domain::a005_payment::ui::list::PaymentList;
use crate::domain::a005_payment::ui::new::PaymentNew;
use crate::system::pages::{ExportHubPage, ProfilePage};
use contracts::domain::a001_agency::Agency;
use contracts::domain::a003_receipt::Receipt;
use contracts::domain::a004_distribution::DistributionRequest;
use contracts::domain::a005_payment::Payment;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

/// Что показывать в табе с данным ключом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabRoute {
    AgencyList,
    AgencyDetails(i64),
    ReceiptList,
    ReceiptDetails(i64),
    ReceiptNew,
    DistributionList,
    DistributionDetails(i64),
    DistributionNew,
    Simulator,
    PaymentList,
    PaymentNew,
    SalesReport,
    DebtReport,
    Profile,
    ExportHub,
    Unknown,
}

impl TabRoute {
    pub fn resolve(key: &str) -> Self {
        if let Some(id) = parse_detail_key(key, AGENCY_DETAIL_PREFIX) {
            return TabRoute::AgencyDetails(id);
        }
        if let Some(id) = parse_detail_key(key, RECEIPT_DETAIL_PREFIX) {
            return TabRoute::ReceiptDetails(id);
        }
        if let Some(id) = parse_detail_key(key, ISSUE_DETAIL_PREFIX) {
            return TabRoute::DistributionDetails(id);
        }

        match key {
            k if k == Agency::list_tab_key() => TabRoute::AgencyList,
            k if k == Receipt::list_tab_key() => TabRoute::ReceiptList,
            k if k == DistributionRequest::list_tab_key() => TabRoute::DistributionList,
            k if k == Payment::list_tab_key() => TabRoute::PaymentList,
            RECEIPT_NEW => TabRoute::ReceiptNew,
            ISSUE_NEW => TabRoute::DistributionNew,
            SIMULATOR => TabRoute::Simulator,
            PAYMENT_NEW => TabRoute::PaymentNew,
            SALES_REPORT => TabRoute::SalesReport,
            DEBT_REPORT => TabRoute::DebtReport,
            PROFILE => TabRoute::Profile,
            EXPORT_HUB => TabRoute::ExportHub,
            _ => TabRoute::Unknown,
        }
    }
}

/// Рендерит контент таба по его ключу; неизвестный ключ даёт заглушку.
pub fn render_tab_content(key: &str) -> AnyView {
    match TabRoute::resolve(key) {
        TabRoute::AgencyList => view! { <AgencyList /> }.into_any(),
        TabRoute::AgencyDetails(id) => view! { <AgencyDetails id=id /> }.into_any(),
        TabRoute::ReceiptList => view! { <ReceiptList /> }.into_any(),
        TabRoute::ReceiptDetails(id) => view! { <ReceiptDetails id=id /> }.into_any(),
        TabRoute::ReceiptNew => view! { <ReceiptNew /> }.into_any(),
        TabRoute::DistributionList => view! { <DistributionList /> }.into_any(),
        TabRoute::DistributionDetails(id) => view! { <DistributionDetails id=id /> }.into_any(),
        TabRoute::DistributionNew => view! { <DistributionNew /> }.into_any(),
        TabRoute::Simulator => view! { <DistributionSimulator /> }.into_any(),
        TabRoute::PaymentList => view! { <PaymentList /> }.into_any(),
        TabRoute::PaymentNew => view! { <PaymentNew /> }.into_any(),
        TabRoute::SalesReport => view! { <SalesReportDashboard /> }.into_any(),
        TabRoute::DebtReport => view! { <DebtReportDashboard /> }.into_any(),
        TabRoute::Profile => view! { <ProfilePage /> }.into_any(),
        TabRoute::ExportHub => view! { <ExportHubPage /> }.into_any(),
        TabRoute::Unknown => {
            log::warn!("Unknown tab key: {}", key);
            let key = key.to_string();
            view! {
                <div class="placeholder">
                    <h3>"Trang không tồn tại"</h3>
                    <p>{key}</p>
                </div>
            }
            .into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_list_keys() {
        assert_eq!(TabRoute::resolve("a001_agency"), TabRoute::AgencyList);
        assert_eq!(TabRoute::resolve("a003_receipts"), TabRoute::ReceiptList);
        assert_eq!(TabRoute::resolve("a004_issues"), TabRoute::DistributionList);
        assert_eq!(TabRoute::resolve("a005_payments"), TabRoute::PaymentList);
    }

    #[test]
    fn test_resolve_detail_keys() {
        assert_eq!(TabRoute::resolve("a001_agency_detail_3"), TabRoute::AgencyDetails(3));
        assert_eq!(TabRoute::resolve("a003_receipt_detail_7"), TabRoute::ReceiptDetails(7));
        assert_eq!(TabRoute::resolve("a004_issue_detail_9"), TabRoute::DistributionDetails(9));
    }

    #[test]
    fn test_resolve_fixed_pages() {
        assert_eq!(TabRoute::resolve(RECEIPT_NEW), TabRoute::ReceiptNew);
        assert_eq!(TabRoute::resolve(SIMULATOR), TabRoute::Simulator);
        assert_eq!(TabRoute::resolve(DEBT_REPORT), TabRoute::DebtReport);
        assert_eq!(TabRoute::resolve(EXPORT_HUB), TabRoute::ExportHub);
    }

    #[test]
    fn test_bad_keys_are_unknown() {
        assert_eq!(TabRoute::resolve("a001_agency_detail_x"), TabRoute::Unknown);
        assert_eq!(TabRoute::resolve("u501_import_from_ut"), TabRoute::Unknown);
    }
}
