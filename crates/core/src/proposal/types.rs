//! Proposal data types.
//!
//! JSON keys are part of the history file format. Histories written by the
//! earlier Portuguese-keyed exporter (`numero_proposta`, `itens`, ...) are
//! read through serde aliases. Every field missing from a document takes
//! the built-in default a blank form would show.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, Utc};
use gigflow_shared::AppConfig;
use gigflow_shared::config::{ElectricalDefaults, PerformerDefaults, ProposalDefaults};
use gigflow_shared::types::ProposalId;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::budget::{BudgetSnapshot, LineItem};

/// The client hiring the band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractingParty {
    /// Person or company name.
    #[serde(alias = "nome")]
    pub name: String,
    /// CPF or CNPJ.
    #[serde(alias = "doc")]
    pub document: String,
    /// Contact e-mail.
    pub email: String,
    /// Contact phone.
    #[serde(alias = "tel")]
    pub phone: String,
    /// Postal address.
    #[serde(alias = "end")]
    pub address: String,
}

/// The company the band invoices through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformingParty {
    /// Registered company name.
    #[serde(alias = "razao")]
    pub legal_name: String,
    /// CNPJ.
    #[serde(alias = "cnpj")]
    pub tax_id: String,
    /// Legal representative signing for the company.
    #[serde(alias = "resp_legal")]
    pub legal_representative: String,
    /// Band manager signing the contract.
    #[serde(alias = "resp_banda")]
    pub band_manager: String,
}

impl From<&PerformerDefaults> for PerformingParty {
    fn from(defaults: &PerformerDefaults) -> Self {
        Self {
            legal_name: defaults.legal_name.clone(),
            tax_id: defaults.tax_id.clone(),
            legal_representative: String::new(),
            band_manager: String::new(),
        }
    }
}

impl Default for PerformingParty {
    fn default() -> Self {
        Self::from(&PerformerDefaults::default())
    }
}

/// On-site logistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventLogistics {
    /// Expected number of guests.
    #[serde(alias = "num_convidados")]
    pub guest_count: u32,
    /// Stage setup time, free text (e.g. "18:00").
    #[serde(alias = "hora_montagem")]
    pub setup_time: String,
    /// Show start time, free text.
    #[serde(alias = "hora_show")]
    pub show_time: String,
    /// Performance venue.
    #[serde(alias = "local_apresentacao")]
    pub venue: String,
}

/// Equipment each side provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Responsibilities {
    /// Provided by the band.
    #[serde(alias = "banda")]
    pub band: String,
    /// Provided by the contracting party.
    #[serde(alias = "contratante")]
    pub contractor: String,
}

impl From<&ProposalDefaults> for Responsibilities {
    fn from(defaults: &ProposalDefaults) -> Self {
        Self {
            band: defaults.band_responsibility.clone(),
            contractor: defaults.contractor_responsibility.clone(),
        }
    }
}

impl Default for Responsibilities {
    fn default() -> Self {
        Self::from(&ProposalDefaults::default())
    }
}

/// Head count travelling to the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamComposition {
    /// Band members.
    #[serde(alias = "integrantes")]
    pub members: u32,
    /// Support crew.
    #[serde(alias = "apoio")]
    pub support: u32,
    /// Companions.
    #[serde(alias = "acompanhantes")]
    pub companions: u32,
}

/// Power supply requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectricalRequirements {
    /// Outlet rating.
    #[serde(alias = "tomada")]
    pub outlet: String,
    /// Voltage.
    #[serde(alias = "tensao")]
    pub voltage: String,
    /// Grounding.
    #[serde(alias = "aterramento")]
    pub grounding: String,
    /// Maximum distance from the stage.
    #[serde(alias = "dist_max")]
    pub max_distance: String,
}

impl From<&ElectricalDefaults> for ElectricalRequirements {
    fn from(defaults: &ElectricalDefaults) -> Self {
        Self {
            outlet: defaults.outlet.clone(),
            voltage: defaults.voltage.clone(),
            grounding: defaults.grounding.clone(),
            max_distance: defaults.max_distance.clone(),
        }
    }
}

impl Default for ElectricalRequirements {
    fn default() -> Self {
        Self::from(&ElectricalDefaults::default())
    }
}

/// Whether the proposal went out to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalStatus {
    /// Still being edited.
    Draft,
    /// Sent to the client.
    Sent,
}

impl ProposalStatus {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Rascunho",
            Self::Sent => "Enviado",
        }
    }
}

/// Event and contract metadata shown next to the budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalMetadata {
    /// Human-facing proposal number, e.g. `RB-20261016-1430`.
    #[serde(default, alias = "numero_proposta")]
    pub proposal_number: String,
    /// Marked as sent to the client.
    #[serde(default, alias = "enviado")]
    pub sent: bool,
    /// Event or client name.
    #[serde(default, alias = "evento")]
    pub event_name: String,
    /// Event date.
    #[serde(default = "today", alias = "data_evento")]
    pub event_date: NaiveDate,
    /// City or location.
    #[serde(default, alias = "cidade")]
    pub city: String,
    /// Days the quote stays valid.
    #[serde(default = "default_validity_days", alias = "validade_dias")]
    pub validity_days: u32,
    /// Payment terms.
    #[serde(default, alias = "cond_pagto")]
    pub payment_terms: String,
    /// Free-form notes printed on the quote.
    #[serde(default, alias = "observacoes")]
    pub notes: String,
    /// Client details.
    #[serde(default, alias = "contratante")]
    pub contracting_party: ContractingParty,
    /// Band company details.
    #[serde(default, alias = "banda")]
    pub performing_party: PerformingParty,
    /// On-site logistics.
    #[serde(default, alias = "evento_info")]
    pub event_logistics: EventLogistics,
    /// Equipment responsibilities.
    #[serde(default, alias = "responsabilidades")]
    pub responsibilities: Responsibilities,
    /// Team head count.
    #[serde(default, alias = "equipe")]
    pub team: TeamComposition,
    /// Power requirements.
    #[serde(default, alias = "energia")]
    pub electrical: ElectricalRequirements,
    /// Penalty for breach, percent of the fee.
    #[serde(default = "default_penalty_pct", alias = "multa_perc")]
    pub penalty_pct: u32,
    /// Court jurisdiction.
    #[serde(default = "default_jurisdiction", alias = "foro")]
    pub jurisdiction: String,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn default_validity_days() -> u32 {
    ProposalDefaults::default().validity_days
}

fn default_penalty_pct() -> u32 {
    ProposalDefaults::default().penalty_pct
}

fn default_jurisdiction() -> String {
    ProposalDefaults::default().jurisdiction
}

fn default_margin_pct() -> Decimal {
    ProposalDefaults::default().margin_pct
}

impl ProposalMetadata {
    /// Builds the metadata of a blank proposal from configured defaults.
    ///
    /// `now` is the local wall-clock time; it dates the event and numbers
    /// the proposal.
    #[must_use]
    pub fn from_config(config: &AppConfig, now: NaiveDateTime) -> Self {
        let proposal = &config.proposal;
        Self {
            proposal_number: format!(
                "{}-{}",
                proposal.number_prefix,
                now.format("%Y%m%d-%H%M")
            ),
            sent: false,
            event_name: String::new(),
            event_date: now.date(),
            city: String::new(),
            validity_days: proposal.validity_days,
            payment_terms: proposal.payment_terms.clone(),
            notes: String::new(),
            contracting_party: ContractingParty::default(),
            performing_party: PerformingParty::from(&config.performer),
            event_logistics: EventLogistics::default(),
            responsibilities: Responsibilities::from(proposal),
            team: TeamComposition::default(),
            electrical: ElectricalRequirements::from(&config.electrical),
            penalty_pct: proposal.penalty_pct,
            jurisdiction: proposal.jurisdiction.clone(),
        }
    }

    /// Draft or sent.
    #[must_use]
    pub const fn status(&self) -> ProposalStatus {
        if self.sent {
            ProposalStatus::Sent
        } else {
            ProposalStatus::Draft
        }
    }

    /// Last day the quote is valid when issued on `issued_on`.
    #[must_use]
    pub fn valid_until(&self, issued_on: NaiveDate) -> NaiveDate {
        issued_on
            .checked_add_days(Days::new(u64::from(self.validity_days)))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// A saved proposal. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct ProposalRecord {
    /// Unique id.
    pub id: ProposalId,
    /// Creation instant; histories are ordered by this value.
    pub created_at: DateTime<Utc>,
    /// Event and contract metadata.
    #[serde(flatten)]
    pub metadata: ProposalMetadata,
    /// Sum of included line totals.
    pub cost_total: Decimal,
    /// Margin percentage.
    pub margin_pct: Decimal,
    /// Margin amount.
    pub margin_amount: Decimal,
    /// Cost plus margin.
    pub proposed_fee: Decimal,
    /// Last day the quote is valid.
    pub valid_until: NaiveDate,
    /// Line items at the time of saving.
    pub items: Vec<LineItem>,
}

impl ProposalRecord {
    /// Rebuilds the budget snapshot stored in this record.
    #[must_use]
    pub fn snapshot(&self) -> BudgetSnapshot {
        BudgetSnapshot {
            line_totals: self.items.iter().map(LineItem::line_total).collect(),
            cost_total: self.cost_total,
            margin_pct: self.margin_pct,
            margin_amount: self.margin_amount,
            proposed_fee: self.proposed_fee,
        }
    }
}

/// On-disk shape of a record, tolerant of older and partial documents.
#[derive(Deserialize)]
struct StoredRecord {
    id: ProposalId,
    #[serde(deserialize_with = "lenient_timestamp")]
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    metadata: ProposalMetadata,
    #[serde(alias = "custo_total")]
    cost_total: Decimal,
    #[serde(default = "default_margin_pct", alias = "margem_pct")]
    margin_pct: Decimal,
    #[serde(default)]
    margin_amount: Option<Decimal>,
    #[serde(alias = "cache_proposto")]
    proposed_fee: Decimal,
    #[serde(alias = "validade_ate")]
    valid_until: NaiveDate,
    #[serde(default, alias = "itens")]
    items: Vec<LineItem>,
}

impl From<StoredRecord> for ProposalRecord {
    fn from(stored: StoredRecord) -> Self {
        // Older exports only kept cost and fee.
        let margin_amount = stored
            .margin_amount
            .unwrap_or_else(|| stored.proposed_fee.saturating_sub(stored.cost_total));
        Self {
            id: stored.id,
            created_at: stored.created_at,
            metadata: stored.metadata,
            cost_total: stored.cost_total,
            margin_pct: stored.margin_pct,
            margin_amount,
            proposed_fee: stored.proposed_fee,
            valid_until: stored.valid_until,
            items: stored.items,
        }
    }
}

/// Accepts RFC 3339 and, for older files, naive timestamps read as UTC.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_from_config_defaults() {
        let metadata = ProposalMetadata::from_config(&AppConfig::default(), noon());

        assert_eq!(metadata.proposal_number, "RB-20261016-1430");
        assert_eq!(metadata.event_date, noon().date());
        assert_eq!(metadata.validity_days, 7);
        assert_eq!(metadata.performing_party.legal_name, "Aditivo Media Management");
        assert_eq!(metadata.performing_party.tax_id, "40.157.297/0001-18");
        assert_eq!(metadata.electrical.outlet, "20A");
        assert_eq!(metadata.responsibilities.contractor, "Som mecânico para a festa");
        assert_eq!(metadata.penalty_pct, 50);
        assert_eq!(metadata.status(), ProposalStatus::Draft);
    }

    #[test]
    fn test_valid_until() {
        let metadata = ProposalMetadata::from_config(&AppConfig::default(), noon());
        assert_eq!(
            metadata.valid_until(noon().date()),
            NaiveDate::from_ymd_opt(2026, 10, 23).unwrap()
        );
    }

    #[test]
    fn test_status_label() {
        assert_eq!(ProposalStatus::Draft.label(), "Rascunho");
        assert_eq!(ProposalStatus::Sent.label(), "Enviado");
    }

    #[test]
    fn test_record_accepts_naive_timestamp_and_missing_groups() {
        let json = r#"{
            "id": "0192a0c4-7c1e-7000-8000-000000000001",
            "created_at": "2025-03-01T10:15:00",
            "proposal_number": "RB-20250301-1015",
            "event_date": "2025-04-12",
            "cost_total": "1800",
            "proposed_fee": 2340.0,
            "valid_until": "2025-03-08"
        }"#;

        let record: ProposalRecord = serde_json::from_str(json).unwrap();
        let metadata = &record.metadata;

        assert_eq!(record.created_at.to_rfc3339(), "2025-03-01T10:15:00+00:00");
        assert_eq!(record.margin_pct, Decimal::from(30));
        assert_eq!(record.margin_amount, Decimal::from(540));
        assert!(record.items.is_empty());
        assert_eq!(record.proposed_fee, Decimal::from(2340));

        assert_eq!(metadata.validity_days, 7);
        assert_eq!(metadata.penalty_pct, 50);
        assert_eq!(metadata.jurisdiction, "Comarca de Jundiaí/SP");
        assert_eq!(metadata.contracting_party, ContractingParty::default());
        assert_eq!(metadata.performing_party.legal_name, "Aditivo Media Management");
        assert_eq!(metadata.performing_party.tax_id, "40.157.297/0001-18");
        assert_eq!(metadata.performing_party.band_manager, "");
        assert_eq!(metadata.event_logistics, EventLogistics::default());
        assert_eq!(metadata.responsibilities.band, "Sonorização e iluminação do show");
        assert_eq!(metadata.responsibilities.contractor, "Som mecânico para a festa");
        assert_eq!(metadata.team, TeamComposition::default());
        assert_eq!(metadata.electrical.outlet, "20A");
        assert_eq!(metadata.electrical.voltage, "220V");
        assert_eq!(metadata.electrical.grounding, "Adequado, conforme NBR 5410");
        assert_eq!(metadata.electrical.max_distance, "10 metros");
    }

    #[test]
    fn test_record_partial_group_fills_missing_fields() {
        let json = r#"{
            "id": "0192a0c4-7c1e-7000-8000-000000000002",
            "created_at": "2025-03-01T10:15:00Z",
            "cost_total": 0,
            "proposed_fee": 0,
            "valid_until": "2025-03-08",
            "performing_party": {"band_manager": "Carlos"},
            "electrical": {"voltage": "127V"},
            "responsibilities": {"contractor": "Gerador"}
        }"#;

        let record: ProposalRecord = serde_json::from_str(json).unwrap();
        let metadata = &record.metadata;

        assert_eq!(metadata.performing_party.band_manager, "Carlos");
        assert_eq!(metadata.performing_party.legal_name, "Aditivo Media Management");
        assert_eq!(metadata.electrical.voltage, "127V");
        assert_eq!(metadata.electrical.outlet, "20A");
        assert_eq!(metadata.responsibilities.contractor, "Gerador");
        assert_eq!(metadata.responsibilities.band, "Sonorização e iluminação do show");
    }

    #[test]
    fn test_record_reads_portuguese_keys() {
        let json = r#"{
            "id": "4f9c2b1e-8a2d-4c55-9e61-2b7f0c1d3a10",
            "created_at": "2025-05-10T19:42:07",
            "numero_proposta": "RB-20250510-1942",
            "enviado": true,
            "evento": "Casamento Silva",
            "data_evento": "2025-06-21",
            "cidade": "Jundiaí",
            "custo_total": 1800.0,
            "margem_pct": 30.0,
            "cache_proposto": 2340.0,
            "validade_ate": "2025-05-17",
            "cond_pagto": "À vista",
            "observacoes": "",
            "contratante": {"nome": "Ana Silva", "doc": "123.456.789-00", "email": "ana@example.com", "tel": "11 99999-0000", "end": "Rua A, 1"},
            "banda": {"razao": "Aditivo Media Management", "cnpj": "40.157.297/0001-18", "resp_legal": "João", "resp_banda": "Pedro"},
            "evento_info": {"num_convidados": 150, "hora_montagem": "17:00", "hora_show": "21:00", "local_apresentacao": "Salão Central"},
            "responsabilidades": {"banda": "Som e luz", "contratante": "Palco"},
            "equipe": {"integrantes": 5, "apoio": 2, "acompanhantes": 1},
            "energia": {"tomada": "32A", "tensao": "220V", "aterramento": "Sim", "dist_max": "5 metros"},
            "multa_perc": 40,
            "foro": "Comarca de Campinas/SP",
            "itens": [
                {"Item": "1. Músicos", "Descrição": "Pagamento músicos", "Quantidade": 6, "Custo Unitário (R$)": 300.0, "Incluir": true, "Total (R$)": 1800.0},
                {"Item": "2. Ajudantes/Staff", "Descrição": "Roadies", "Quantidade": 2, "Custo Unitário (R$)": 50.0, "Incluir": false, "Total (R$)": 0.0}
            ]
        }"#;

        let record: ProposalRecord = serde_json::from_str(json).unwrap();
        let metadata = &record.metadata;

        assert_eq!(metadata.proposal_number, "RB-20250510-1942");
        assert_eq!(metadata.status(), ProposalStatus::Sent);
        assert_eq!(metadata.event_name, "Casamento Silva");
        assert_eq!(metadata.event_date, NaiveDate::from_ymd_opt(2025, 6, 21).unwrap());
        assert_eq!(metadata.city, "Jundiaí");
        assert_eq!(metadata.payment_terms, "À vista");
        assert_eq!(metadata.contracting_party.phone, "11 99999-0000");
        assert_eq!(metadata.contracting_party.address, "Rua A, 1");
        assert_eq!(metadata.performing_party.band_manager, "Pedro");
        assert_eq!(metadata.event_logistics.guest_count, 150);
        assert_eq!(metadata.event_logistics.venue, "Salão Central");
        assert_eq!(metadata.responsibilities.contractor, "Palco");
        assert_eq!(metadata.team.members, 5);
        assert_eq!(metadata.electrical.outlet, "32A");
        assert_eq!(metadata.penalty_pct, 40);
        assert_eq!(metadata.jurisdiction, "Comarca de Campinas/SP");

        assert_eq!(record.cost_total, Decimal::from(1800));
        assert_eq!(record.margin_pct, Decimal::from(30));
        assert_eq!(record.margin_amount, Decimal::from(540));
        assert_eq!(record.valid_until, NaiveDate::from_ymd_opt(2025, 5, 17).unwrap());
        assert_eq!(record.items.len(), 2);
        assert!(!record.items[1].include);
        assert_eq!(record.snapshot().line_totals, vec![Decimal::from(1800), Decimal::ZERO]);
    }

    #[test]
    fn test_record_rejects_garbage_timestamp() {
        let json = r#"{
            "id": "0192a0c4-7c1e-7000-8000-000000000001",
            "created_at": "yesterday",
            "cost_total": "0",
            "margin_pct": "30",
            "proposed_fee": "0",
            "valid_until": "2025-03-08"
        }"#;

        assert!(serde_json::from_str::<ProposalRecord>(json).is_err());
    }
}
