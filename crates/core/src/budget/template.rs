//! Default line item template loaded at session start.

use super::types::LineItem;

const DEFAULT_ROWS: [(&str, &str); 12] = [
    ("1. Músicos", "Pagamento músicos"),
    ("2. Ajudantes/Staff", "Pagamento de ajudantes (roadies)"),
    ("3. Transporte", "Aluguel/combustível de carros próprios"),
    ("4. Pedágio", "Custos com pedágios (ida e volta)"),
    ("5. Combustível", "Estimativa ida/volta (média 13 km/L)"),
    ("6. Alimentação", "Refeição completa para equipe"),
    ("7. Hospedagem", "Caso haja necessidade de pernoite"),
    ("8. Som/Luz Kiko", "PA até 100 pessoas + Monitoramento + Luz"),
    ("9. PA Guilherme", "PA para eventos acima de 100 pessoas"),
    ("10. Estrutura Evento", "Palco, som, luz, telão, treliças"),
    ("11. Técnico de Som", "Palco/FOH"),
    ("12. Outros Custos", "Equipamentos extras, imprevistos"),
];

/// Returns the twelve default rows, all zeroed and included.
#[must_use]
pub fn default_line_items() -> Vec<LineItem> {
    DEFAULT_ROWS
        .iter()
        .map(|(label, description)| LineItem::blank(*label, *description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_default_template() {
        let items = default_line_items();
        assert_eq!(items.len(), 12);
        assert_eq!(items[0].label, "1. Músicos");
        assert_eq!(items[11].label, "12. Outros Custos");
        assert!(items.iter().all(|item| item.include));
        assert!(items.iter().all(|item| item.line_total() == Decimal::ZERO));
    }
}
