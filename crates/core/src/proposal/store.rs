//! In-memory proposal history owned by one session.

use chrono::{DateTime, Utc};
use gigflow_shared::types::ProposalId;

use super::error::ProposalError;
use super::types::{ProposalMetadata, ProposalRecord};
use crate::budget::{BudgetSnapshot, LineItem};

/// Append-only collection of saved proposals.
///
/// Records are only ever added by [`ProposalStore::save`], removed by
/// [`ProposalStore::delete`], or replaced wholesale by
/// [`ProposalStore::import`]. No method hands out a mutable record.
#[derive(Debug, Clone, Default)]
pub struct ProposalStore {
    records: Vec<ProposalRecord>,
}

impl ProposalStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a snapshot stamped with the current instant.
    pub fn save(
        &mut self,
        metadata: ProposalMetadata,
        items: Vec<LineItem>,
        snapshot: &BudgetSnapshot,
    ) -> ProposalRecord {
        self.save_at(metadata, items, snapshot, Utc::now())
    }

    /// Saves a snapshot with an explicit creation instant.
    pub fn save_at(
        &mut self,
        metadata: ProposalMetadata,
        items: Vec<LineItem>,
        snapshot: &BudgetSnapshot,
        created_at: DateTime<Utc>,
    ) -> ProposalRecord {
        let record = ProposalRecord {
            id: ProposalId::new(),
            created_at,
            valid_until: metadata.valid_until(created_at.date_naive()),
            metadata,
            cost_total: snapshot.cost_total,
            margin_pct: snapshot.margin_pct,
            margin_amount: snapshot.margin_amount,
            proposed_fee: snapshot.proposed_fee,
            items,
        };

        tracing::info!(
            proposal_id = %record.id,
            proposal_number = %record.metadata.proposal_number,
            proposed_fee = %record.proposed_fee,
            "Proposal saved"
        );

        self.records.push(record.clone());
        record
    }

    /// Records ordered by creation instant, most recent first.
    #[must_use]
    pub fn list(&self) -> Vec<&ProposalRecord> {
        let mut ordered: Vec<&ProposalRecord> = self.records.iter().collect();
        ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        ordered
    }

    /// Records in insertion order, as exported.
    #[must_use]
    pub fn records(&self) -> &[ProposalRecord] {
        &self.records
    }

    /// Number of saved records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when nothing has been saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes the record with this id. Unknown ids are a no-op.
    pub fn delete(&mut self, id: ProposalId) -> bool {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            tracing::debug!(proposal_id = %id, "Delete ignored, proposal not found");
            return false;
        };

        self.records.remove(index);
        tracing::info!(proposal_id = %id, "Proposal deleted");
        true
    }

    /// Looks up a record to restore into the editor.
    ///
    /// # Errors
    ///
    /// Returns `ProposalError::NotFound` if the id is absent.
    pub fn load(&self, id: ProposalId) -> Result<&ProposalRecord, ProposalError> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or(ProposalError::NotFound(id))
    }

    /// Encodes the whole history as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns `ProposalError::Serialize` if encoding fails.
    pub fn export(&self) -> Result<String, ProposalError> {
        serde_json::to_string_pretty(&self.records)
            .map_err(|e| ProposalError::Serialize(e.to_string()))
    }

    /// Replaces the history with the records in `document`.
    ///
    /// The document is fully parsed before anything is replaced, so a
    /// failed import leaves the current history intact.
    ///
    /// # Errors
    ///
    /// Returns `ProposalError::Parse` if the document is not a JSON array
    /// of proposal records.
    pub fn import(&mut self, document: &str) -> Result<usize, ProposalError> {
        let records: Vec<ProposalRecord> = serde_json::from_str(document).map_err(|e| {
            tracing::warn!(error = %e, kept = self.records.len(), "History import rejected");
            ProposalError::Parse(e.to_string())
        })?;

        let count = records.len();
        self.records = records;
        tracing::info!(count, "History imported");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::BudgetService;
    use chrono::{NaiveDate, TimeZone};
    use gigflow_shared::AppConfig;
    use rust_decimal_macros::dec;

    fn metadata(number: &str) -> ProposalMetadata {
        let now = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        ProposalMetadata {
            proposal_number: number.to_string(),
            ..ProposalMetadata::from_config(&AppConfig::default(), now)
        }
    }

    fn save_one(store: &mut ProposalStore, number: &str, hour: u32) -> ProposalRecord {
        let items = vec![
            LineItem::new("Músicos", "", dec!(6), dec!(300)),
            LineItem::new("Som", "", dec!(2), dec!(50)).included(false),
        ];
        let snapshot = BudgetService::compute(&items, dec!(30));
        let created_at = Utc.with_ymd_and_hms(2026, 10, 16, hour, 0, 0).unwrap();
        store.save_at(metadata(number), items, &snapshot, created_at)
    }

    #[test]
    fn test_save_copies_snapshot_values() {
        let mut store = ProposalStore::new();
        let record = save_one(&mut store, "RB-1", 10);

        assert_eq!(store.len(), 1);
        assert_eq!(record.cost_total, dec!(1800));
        assert_eq!(record.margin_amount, dec!(540));
        assert_eq!(record.proposed_fee, dec!(2340));
        assert_eq!(record.margin_pct, dec!(30));
        assert_eq!(record.items.len(), 2);
        assert_eq!(
            record.valid_until,
            NaiveDate::from_ymd_opt(2026, 10, 23).unwrap()
        );
        assert_eq!(store.load(record.id).unwrap(), &record);
    }

    #[test]
    fn test_save_assigns_unique_ids() {
        let mut store = ProposalStore::new();
        let a = save_one(&mut store, "RB-1", 10);
        let b = save_one(&mut store, "RB-1", 10);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_save_stamps_current_time() {
        let mut store = ProposalStore::new();
        let before = Utc::now();
        let record = store.save(
            metadata("RB-now"),
            Vec::new(),
            &BudgetService::compute(&[], dec!(30)),
        );
        assert!(record.created_at >= before);
        assert!(record.created_at <= Utc::now());
    }

    #[test]
    fn test_list_orders_by_creation_instant() {
        let mut store = ProposalStore::new();
        save_one(&mut store, "T2", 11);
        save_one(&mut store, "T3", 12);
        save_one(&mut store, "T1", 9);

        let numbers: Vec<&str> = store
            .list()
            .iter()
            .map(|r| r.metadata.proposal_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["T3", "T2", "T1"]);
    }

    #[test]
    fn test_list_is_not_lexical_on_formatted_dates() {
        // 02/11 sorts before 16/10 as text but is later in time.
        let mut store = ProposalStore::new();
        let items = Vec::new();
        let snapshot = BudgetService::compute(&items, dec!(30));
        store.save_at(
            metadata("october"),
            items.clone(),
            &snapshot,
            Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap(),
        );
        store.save_at(
            metadata("november"),
            items,
            &snapshot,
            Utc.with_ymd_and_hms(2026, 11, 2, 8, 0, 0).unwrap(),
        );

        assert_eq!(store.list()[0].metadata.proposal_number, "november");
    }

    #[test]
    fn test_delete_present_and_missing() {
        let mut store = ProposalStore::new();
        let keep = save_one(&mut store, "keep", 9);
        let gone = save_one(&mut store, "gone", 10);

        assert!(!store.delete(ProposalId::new()));
        assert_eq!(store.len(), 2);

        assert!(store.delete(gone.id));
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].id, keep.id);

        assert!(!store.delete(gone.id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let store = ProposalStore::new();
        let id = ProposalId::new();
        assert!(matches!(store.load(id), Err(ProposalError::NotFound(missing)) if missing == id));
    }

    #[test]
    fn test_export_uses_nested_groups() {
        let mut store = ProposalStore::new();
        save_one(&mut store, "RB-1", 10);

        let json = store.export().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let record = &value[0];

        assert!(value.is_array());
        assert!(json.contains('\n'));
        assert_eq!(record["proposal_number"], "RB-1");
        assert_eq!(record["contracting_party"]["name"], "");
        assert_eq!(
            record["performing_party"]["legal_name"],
            "Aditivo Media Management"
        );
        assert_eq!(record["event_logistics"]["guest_count"], 0);
        assert_eq!(record["team"]["members"], 0);
        assert_eq!(record["electrical"]["voltage"], "220V");
        assert_eq!(record["penalty_pct"], 50);
        assert_eq!(record["jurisdiction"], "Comarca de Jundiaí/SP");
        assert_eq!(record["items"][1]["include"], false);
    }

    #[test]
    fn test_export_empty_store() {
        assert_eq!(ProposalStore::new().export().unwrap(), "[]");
    }

    #[test]
    fn test_import_replaces_collection() {
        let mut source = ProposalStore::new();
        save_one(&mut source, "A", 9);
        save_one(&mut source, "B", 10);
        let document = source.export().unwrap();

        let mut target = ProposalStore::new();
        save_one(&mut target, "old", 8);

        assert_eq!(target.import(&document).unwrap(), 2);
        assert_eq!(target.records(), source.records());
    }

    #[test]
    fn test_import_malformed_keeps_collection() {
        let mut store = ProposalStore::new();
        let kept = save_one(&mut store, "kept", 9);

        for document in ["{}", "not json", r#"[{"id": "nope"}]"#, "", "42"] {
            let result = store.import(document);
            assert!(matches!(result, Err(ProposalError::Parse(_))), "{document}");
            assert_eq!(store.len(), 1);
            assert_eq!(store.records()[0], kept);
        }
    }

    #[test]
    fn test_import_portuguese_keyed_history() {
        let document = r#"[
          {
            "id": "1b4e28ba-2fa1-4d3b-a3f5-ef19b5a7633b",
            "created_at": "2025-05-10T19:42:07",
            "numero_proposta": "RB-20250510-1942",
            "enviado": false,
            "evento": "Aniversário",
            "data_evento": "2025-06-21",
            "cidade": "Itu",
            "custo_total": 1000.0,
            "margem_pct": 20.0,
            "cache_proposto": 1200.0,
            "validade_ate": "2025-05-17",
            "cond_pagto": "",
            "observacoes": "",
            "multa_perc": 50,
            "foro": "Comarca de Jundiaí/SP",
            "itens": [
              {"Item": "1. Músicos", "Descrição": "", "Quantidade": 4, "Custo Unitário (R$)": 250.0, "Incluir": true, "Total (R$)": 1000.0}
            ]
          },
          {
            "id": "6a1f0c7e-93d4-4b8e-8f2a-0c5d7e9b1a24",
            "created_at": "2025-05-12T08:00:00",
            "numero_proposta": "RB-20250512-0800",
            "evento": "Formatura",
            "data_evento": "2025-07-05",
            "custo_total": 0.0,
            "margem_pct": 30.0,
            "cache_proposto": 0.0,
            "validade_ate": "2025-05-19",
            "itens": []
          }
        ]"#;

        let mut store = ProposalStore::new();
        assert_eq!(store.import(document).unwrap(), 2);

        let listed = store.list();
        assert_eq!(listed[0].metadata.proposal_number, "RB-20250512-0800");
        assert_eq!(listed[1].metadata.event_name, "Aniversário");
        assert_eq!(listed[1].margin_amount, dec!(200));
        assert_eq!(listed[1].snapshot().line_totals, vec![dec!(1000)]);
        assert_eq!(listed[0].metadata.electrical.outlet, "20A");

        let exported = store.export().unwrap();
        let mut reloaded = ProposalStore::new();
        reloaded.import(&exported).unwrap();
        assert_eq!(reloaded.records(), store.records());
    }
}
