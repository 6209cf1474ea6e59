use crate::aggregate::{Aggregator, Highlights};
use crate::commands::{load, Out};
use crate::{Config, Result};
use chrono::FixedOffset;

/// Computes the all-time entry, expense and balance cards.
pub async fn dashboard(config: Config, offset: FixedOffset) -> Result<Out<Highlights>> {
    let transactions = load(&config).await?;
    let highlights = Aggregator::new(offset).highlights(transactions.data());
    Ok(Out::new(
        format!(
            "Entradas {} | Saídas {} | Total {}",
            highlights.entries.amount_formatted,
            highlights.expensives.amount_formatted,
            highlights.total.amount_formatted
        ),
        highlights,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::{at, tx};
    use crate::model::TransactionType;
    use crate::test::TestEnv;
    use chrono::{Offset, Utc};

    #[tokio::test]
    async fn test_dashboard() {
        let env = TestEnv::new().await;
        env.seed(vec![
            tx("1", "100", TransactionType::Positive, "salary", at(2024, 3, 1)),
            tx("2", "160", TransactionType::Negative, "car", at(2024, 3, 5)),
        ])
        .await;
        let out = dashboard(env.config(), Utc.fix()).await.unwrap();
        assert_eq!(
            out.message(),
            "Entradas R$ 100,00 | Saídas R$ 160,00 | Total -R$ 60,00"
        );
        let h = out.structure().unwrap();
        assert_eq!(h.total.interval.as_deref(), Some("01 a 5 de março"));
    }
}
