//! Natural-language request sent to the remote estimator

use crate::instrument::ValidatedQuote;

/// Build the prompt embedding the same inputs the local engine uses
pub fn build_prompt(quote: &ValidatedQuote) -> String {
    let (market_line, value_rule) = match quote.request().market_tna {
        Some(tna) => (
            format!("- TNA de mercado: {:.2}%\n", tna),
            format!(
                "   - Se informó TNA de mercado: para cualquier instrumento con vencimiento usa \
Monto * (1 + {:.2}% * días / 365), también en Lecaps y Bonos.\n",
                tna
            ),
        ),
        None => (
            String::new(),
            "   - Lecaps y Bonos: los nominales se reciben al 100% al vencimiento.\n".to_string(),
        ),
    };

    format!(
        "Eres un asesor financiero experto del mercado argentino. Necesito que calcules las métricas \
financieras para la siguiente inversión.

DATOS DE LA INVERSIÓN:
- Tipo de Instrumento: {category}
- Ticker: {ticker}
- Precio de Compra (por cada 100 nominales): {price}
- Monto Total Invertido: ARS ${amount}
- Fecha de Compra: {date}
{market_line}
INSTRUCCIONES DE CÁLCULO:
1. Fecha de Vencimiento: determínala a partir del ticker.
   - Convención de tickers argentinos: S30N6 = vence 30/Nov/2026, S31G6 = 31/Ago/2026, S16M6 = 16/Mar/2026.
   - Plazos Fijos: 30 días desde la fecha de compra (90 días para PF-UVA).
   - Cauciones: 1 día desde la fecha de compra.
   - Acciones/CEDEARs/FCI/Cripto: no tienen vencimiento, indica \"Sin vencimiento\".
2. Nominales = (Monto Invertido / Precio) * 100
3. Valor al Vencimiento:
{value_rule}   - Plazos Fijos y Cauciones: Capital * (1 + TNA * días / 365).
4. Métricas (rendimiento total r = (Valor al Vencimiento - Monto) / Monto):
   - TEM = (1 + r) ^ (30 / días) - 1
   - TNA = r * (365 / días)
   - TAE = (1 + TEM) ^ 12 - 1
   - TIR = TAE para un solo flujo
5. Explicación: breve explicación en español de los cálculos.

RESPONDE EXCLUSIVAMENTE con un objeto JSON (sin markdown, sin backticks):
{{
    \"maturityDate\": \"DD/MM/YYYY\",
    \"maturityValue\": number,
    \"nominals\": number,
    \"tem\": \"X.XX%\",
    \"tir\": \"X.XX%\",
    \"tna\": \"X.XX%\",
    \"tae\": \"X.XX%\",
    \"explanation\": \"Explicación breve en español\"
}}
",
        category = quote.category().label(),
        ticker = quote.ticker(),
        price = quote.price(),
        amount = quote.amount(),
        date = quote.purchase_date().format("%Y-%m-%d"),
        market_line = market_line,
        value_rule = value_rule,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::{InstrumentCategory, InstrumentQuoteRequest};
    use chrono::NaiveDate;

    #[test]
    fn test_prompt_embeds_inputs() {
        let quote = InstrumentQuoteRequest::new(
            InstrumentCategory::ShortTermNote,
            "S30A6",
            108.1,
            1_000_000.0,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
        .with_market_tna(43.8)
        .validate()
        .unwrap();

        let prompt = build_prompt(&quote);
        assert!(prompt.contains("Tipo de Instrumento: Lecaps"));
        assert!(prompt.contains("Ticker: S30A6"));
        assert!(prompt.contains("Precio de Compra (por cada 100 nominales): 108.1"));
        assert!(prompt.contains("ARS $1000000"));
        assert!(prompt.contains("Fecha de Compra: 2026-01-01"));
        assert!(prompt.contains("TNA de mercado: 43.80%"));
        assert!(prompt.contains("\"maturityValue\": number"));
        assert!(prompt.contains("Monto * (1 + 43.80% * días / 365)"));
        assert!(!prompt.contains("se reciben al 100%"));
    }

    #[test]
    fn test_prompt_without_market_rate() {
        let quote = InstrumentQuoteRequest::new(
            InstrumentCategory::FixedDeposit,
            "PF-30",
            100.0,
            5_000.0,
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        )
        .validate()
        .unwrap();

        let prompt = build_prompt(&quote);
        assert!(!prompt.contains("TNA de mercado"));
        assert!(prompt.contains("Lecaps y Bonos: los nominales se reciben al 100% al vencimiento."));
    }
}
