//! In-process data source with simulated latency.
//!
//! Serves a fixed set of PPE product records, sleeps before every answer to mimic
//! network latency, and can be told to fail the next N calls.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value as JsonValue, json};

use safequote_quotes::{QuotePayload, SubmissionReceipt};

use super::{CatalogSource, TransportError};

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// The ten records the catalog ships with.
pub fn seed_records() -> Vec<JsonValue> {
    vec![
        json!({
            "id": 1,
            "name": "Capacete de Segurança",
            "category": "Proteção para cabeça",
            "description": "Capacete de segurança com carneira ajustável.",
            "price": 45.90,
            "image": "https://images.tcdn.com.br/img/img_prod/1194153/capacete_de_seguranca_plastcor_classe_b_plt_com_suspensao_branco_c_a_31469_147_1_8a9972e99498fae2c80d7f36c11f4afd.png",
            "certificationCode": "NBR 8221",
            "available": true
        }),
        json!({
            "id": 2,
            "name": "Respirador PFF2",
            "category": "Proteção respiratória",
            "description": "Proteção respiratória contra poeiras e névoas.",
            "price": 6.50,
            "image": "https://d3bhvz7al37iy6.cloudfront.net/Custom/Content/Products/10/53/1053479_mascara-respiratoria-pff2-vo-pro-agro-com-valvula-e-carvao-ativado-delta-plus-ca-38507-_s3_638315746781260540.webp",
            "certificationCode": "NBR 13698",
            "available": true
        }),
        json!({
            "id": 3,
            "name": "Luva de Segurança",
            "category": "Proteção para mãos",
            "description": "Luva de segurança confeccionada em látex.",
            "price": 8.90,
            "image": "https://images.tcdn.com.br/img/img_prod/995770/luva_de_latex_super_safety_silver_amarela_9153_1_9a1f5956137237a0929dae9453420331.jpg",
            "certificationCode": "NBR 13392",
            "available": true
        }),
        json!({
            "id": 4,
            "name": "Protetor Auricular",
            "category": "Proteção auricular",
            "description": "Protetor auricular tipo plug de silicone.",
            "price": 3.50,
            "image": "https://telhanorte.vtexassets.com/arquivos/ids/1257794-400-auto",
            "certificationCode": "NBR 16076",
            "available": true
        }),
        json!({
            "id": 5,
            "name": "Bota de Segurança",
            "category": "Proteção para os pés",
            "description": "Bota de segurança com biqueira de composite.",
            "price": 89.90,
            "image": "https://cdn-themes.shoppub.io/6deacde3-3e01-4460-bcbf-db7107562dea/live/static/assets/img/Newsletter-Mobile3.jpg?_ts=1694024375",
            "certificationCode": "NBR ISO 20345",
            "available": true
        }),
        json!({
            "id": 6,
            "name": "Óculos de Proteção",
            "category": "Proteção facial e ocular",
            "description": "Óculos de segurança com lente incolor e proteção lateral.",
            "price": 12.90,
            "image": "https://centercor.vtexassets.com/arquivos/ids/525046-800-auto?v=638334305340800000&width=800&height=auto&aspect=true",
            "certificationCode": "NBR 16360",
            "available": true
        }),
        json!({
            "id": 7,
            "name": "Protetor Auricular Tipo Concha",
            "category": "Proteção auricular",
            "description": "Protetor auricular tipo concha.",
            "price": 78.05,
            "image": "https://m.media-amazon.com/images/I/51nwjQebQCL.__AC_SX300_SY300_QL70_ML2_.jpg",
            "certificationCode": "NBR 16390",
            "available": false
        }),
        json!({
            "id": 8,
            "name": "Respirador Purificador De Ar",
            "category": "Proteção respiratória",
            "description": "Respirador purificador de ar de segurança.",
            "price": 60.50,
            "image": "https://http2.mlstatic.com/D_NQ_NP_2X_663086-MLB51778832852_092022-F-respirador-purificador-de-ar-seguranca-destra-com-2-filtros.webp",
            "certificationCode": "NBR 13681",
            "available": true
        }),
        json!({
            "id": 9,
            "name": "Luva Tricotada Pigmentada Emborrachada",
            "category": "Proteção para mãos",
            "description": "Par de luva de segurança tricotada com fios de algodão e poliéster.",
            "price": 11.90,
            "image": "https://m.media-amazon.com/images/I/61SB2UgsjiL._AC_SX569_.jpg",
            "certificationCode": "NBR 13458",
            "available": false
        }),
        json!({
            "id": 10,
            "name": "Meia Térmica de Algodão",
            "category": "Proteção para pés",
            "description": "Proteção dos pés do usuário em ambientes de baixa temperatura.",
            "price": 7.90,
            "image": "https://d3bhvz7al37iy6.cloudfront.net/Custom/Content/Products/10/65/1065805_meia-termica-de-algodao-preta-prevemax-para-baixa-temperatura-ca-44422_m1_638114548393134663.webp",
            "certificationCode": "NBR 13446",
            "available": true
        }),
    ]
}

#[derive(Debug)]
pub struct MockCatalogSource {
    records: Vec<JsonValue>,
    latency: Duration,
    /// Per-keyword latency overrides for category queries (lower-cased keyword).
    category_latency: HashMap<String, Duration>,
    pending_failures: AtomicU32,
    submissions: Mutex<Vec<QuotePayload>>,
}

impl Default for MockCatalogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalogSource {
    pub fn new() -> Self {
        Self::with_records(seed_records())
    }

    pub fn with_records(records: Vec<JsonValue>) -> Self {
        Self {
            records,
            latency: DEFAULT_LATENCY,
            category_latency: HashMap::new(),
            pending_failures: AtomicU32::new(0),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Answer category queries for `keyword` after `latency` instead of the default.
    pub fn with_category_latency(mut self, keyword: &str, latency: Duration) -> Self {
        self.category_latency.insert(keyword.to_lowercase(), latency);
        self
    }

    /// Make the next `count` calls fail with [`TransportError::Unavailable`].
    pub fn fail_next(&self, count: u32) {
        self.pending_failures.store(count, Ordering::SeqCst);
    }

    /// Payloads received so far, oldest first.
    pub fn submissions(&self) -> Vec<QuotePayload> {
        self.submissions
            .lock()
            .map(|subs| subs.clone())
            .unwrap_or_default()
    }

    async fn round_trip(&self, latency: Duration) -> Result<(), TransportError> {
        tokio::time::sleep(latency).await;

        let injected = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            tracing::debug!("mock data source: injected transport failure");
            return Err(TransportError::Unavailable("simulated network fault".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    async fn list_products(&self) -> Result<Vec<JsonValue>, TransportError> {
        self.round_trip(self.latency).await?;
        Ok(self.records.clone())
    }

    async fn list_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<JsonValue>, TransportError> {
        let keyword = category.to_lowercase();
        let latency = self
            .category_latency
            .get(&keyword)
            .copied()
            .unwrap_or(self.latency);
        self.round_trip(latency).await?;

        Ok(self
            .records
            .iter()
            .filter(|record| {
                record
                    .get("category")
                    .and_then(JsonValue::as_str)
                    .is_some_and(|c| c.to_lowercase().contains(&keyword))
            })
            .cloned()
            .collect())
    }

    async fn submit_quote(
        &self,
        payload: &QuotePayload,
    ) -> Result<SubmissionReceipt, TransportError> {
        self.round_trip(self.latency).await?;

        self.submissions
            .lock()
            .map_err(|_| TransportError::Malformed("submission log poisoned".to_string()))?
            .push(payload.clone());

        Ok(SubmissionReceipt {
            success: true,
            message: "Orçamento recebido com sucesso".to_string(),
            reference_code: format!("ORC-{}", Utc::now().timestamp_millis()),
            eta: "24 horas úteis".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safequote_quotes::QuoteBasket;
    use safequote_validation::QuoteForm;

    #[tokio::test(start_paused = true)]
    async fn lists_every_seed_record() {
        let source = MockCatalogSource::new();
        let records = source.list_products().await.unwrap();
        assert_eq!(records.len(), 10);
    }

    #[test]
    fn every_seed_record_carries_an_image() {
        let records = seed_records();
        assert!(records.iter().all(|r| r["image"].as_str().is_some_and(|url| url.starts_with("https://"))));
    }

    #[tokio::test(start_paused = true)]
    async fn answers_after_the_configured_latency() {
        let source = MockCatalogSource::new().with_latency(Duration::from_millis(500));
        let started = tokio::time::Instant::now();

        source.list_products().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn category_query_matches_case_insensitive_substring() {
        let source = MockCatalogSource::new();

        let hands = source.list_products_by_category("MÃOS").await.unwrap();
        let ids: Vec<u64> = hands.iter().filter_map(|r| r["id"].as_u64()).collect();
        assert_eq!(ids, vec![3, 9]);

        let feet = source.list_products_by_category("pés").await.unwrap();
        assert_eq!(feet.len(), 2);

        let none = source.list_products_by_category("inexistente").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn injected_failures_are_consumed_one_call_at_a_time() {
        let source = MockCatalogSource::new();
        source.fail_next(2);

        assert!(matches!(source.list_products().await, Err(TransportError::Unavailable(_))));
        assert!(source.list_products_by_category("mãos").await.is_err());
        assert!(source.list_products().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_records_payload_and_issues_reference_code() {
        let source = MockCatalogSource::new();
        let payload = QuotePayload::assemble(
            &QuoteForm::new("Maria Souza", "maria@empresa.com.br", "", "luvas"),
            &QuoteBasket::new(),
        );

        let receipt = source.submit_quote(&payload).await.unwrap();

        assert!(receipt.success);
        assert!(receipt.reference_code.starts_with("ORC-"));
        assert_eq!(receipt.eta, "24 horas úteis");
        assert_eq!(source.submissions(), vec![payload]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_submission_is_not_recorded() {
        let source = MockCatalogSource::new();
        source.fail_next(1);
        let payload = QuotePayload::assemble(&QuoteForm::default(), &QuoteBasket::new());

        assert!(source.submit_quote(&payload).await.is_err());
        assert!(source.submissions().is_empty());
    }
}
