//! Service-contract document.

use gigflow_shared::types::CurrencyFormat;
use serde::Serialize;

use crate::budget::BudgetSnapshot;
use crate::proposal::history::or_dash;
use crate::proposal::{
    ContractingParty, PerformingParty, ProposalMetadata, Responsibilities, TeamComposition,
};

/// Blank signature line used when no signatory name is known.
const SIGNATURE_LINE: &str = "________________________________";

/// Event details section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSection {
    /// Event date, `dd/mm/yyyy`.
    pub date: String,
    /// City or `-`.
    pub city: String,
    /// Guest count.
    pub guest_count: u32,
    /// Setup time or `-`.
    pub setup_time: String,
    /// Show time or `-`.
    pub show_time: String,
    /// Venue or `-`.
    pub venue: String,
}

/// A numbered contract clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    /// 1-based clause number.
    pub number: u8,
    /// Clause text.
    pub text: String,
}

/// Names printed under the signature lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signatures {
    /// Contracting party signatory.
    pub contractor: String,
    /// Contracting party document, may be empty.
    pub contractor_document: String,
    /// Performing company name.
    pub performer_company: String,
    /// Band signatory.
    pub performer: String,
}

/// Service contract between the client and the band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractDocument {
    /// Client, blank fields as `-`.
    pub contracting_party: ContractingParty,
    /// Band company, blank fields as `-`.
    pub performing_party: PerformingParty,
    /// Event details.
    pub event: EventSection,
    /// Equipment responsibilities.
    pub responsibilities: Responsibilities,
    /// Team head count.
    pub team: TeamComposition,
    /// Numbered clauses.
    pub clauses: Vec<Clause>,
    /// Signature block.
    pub signatures: Signatures,
}

impl ContractDocument {
    /// Builds the contract from the metadata and the fee in `snapshot`.
    #[must_use]
    pub fn build(
        metadata: &ProposalMetadata,
        snapshot: &BudgetSnapshot,
        currency: &CurrencyFormat,
    ) -> Self {
        let client = &metadata.contracting_party;
        let band = &metadata.performing_party;
        let logistics = &metadata.event_logistics;
        let power = &metadata.electrical;

        let clause_texts = [
            format!(
                "Valor total do serviço: {} - Pagamento: {}.",
                currency.format(snapshot.proposed_fee),
                or_dash(&metadata.payment_terms)
            ),
            "Despesas de transporte: responsabilidade da Contratada.".to_string(),
            "Alimentação de banda e equipe: responsabilidade da Contratante.".to_string(),
            "Alteração de data: deve ser comunicada por escrito ao responsável indicado."
                .to_string(),
            "O responsável que assina pela Contratante é fiador solidário.".to_string(),
            "A Contratante responde por danos aos equipamentos ou integrantes por problemas no local."
                .to_string(),
            format!(
                "Energia elétrica conforme NBR 5410: tomada {}, {}, aterramento {}; distância máxima do palco: {}.",
                power.outlet, power.voltage, power.grounding, power.max_distance
            ),
            format!(
                "Multa por descumprimento: {}% do valor total.",
                metadata.penalty_pct
            ),
            format!("Foro: {}.", metadata.jurisdiction),
        ];

        let clauses = (1u8..)
            .zip(clause_texts)
            .map(|(number, text)| Clause { number, text })
            .collect();

        Self {
            contracting_party: ContractingParty {
                name: or_dash(&client.name),
                document: or_dash(&client.document),
                email: or_dash(&client.email),
                phone: or_dash(&client.phone),
                address: or_dash(&client.address),
            },
            performing_party: PerformingParty {
                legal_name: band.legal_name.clone(),
                tax_id: band.tax_id.clone(),
                legal_representative: or_dash(&band.legal_representative),
                band_manager: or_dash(&band.band_manager),
            },
            event: EventSection {
                date: metadata.event_date.format("%d/%m/%Y").to_string(),
                city: or_dash(&metadata.city),
                guest_count: logistics.guest_count,
                setup_time: or_dash(&logistics.setup_time),
                show_time: or_dash(&logistics.show_time),
                venue: or_dash(&logistics.venue),
            },
            responsibilities: metadata.responsibilities.clone(),
            team: metadata.team,
            clauses,
            signatures: Signatures {
                contractor: signatory(&client.name),
                contractor_document: client.document.trim().to_string(),
                performer_company: band.legal_name.clone(),
                performer: signatory(&band.band_manager),
            },
        }
    }
}

fn signatory(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        SIGNATURE_LINE.to_string()
    } else {
        name.to_string()
    }
}
