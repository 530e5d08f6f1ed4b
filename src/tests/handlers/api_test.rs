use percent_encoding::percent_decode_str;
use serde_json::{json, Value};

use crate::tests::common::fixtures::{booking_json, saturday, setup_test_server, sunday, tuesday};

/// JSON API handler tests
#[cfg(test)]
mod api_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let (server, _) = setup_test_server(false);

        let response = server.get("/health").await;

        assert_eq!(response.status_code().as_u16(), 200);
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn test_list_barbers() {
        let (server, _) = setup_test_server(false);

        let response = server.get("/api/barbers").await;
        assert_eq!(response.status_code().as_u16(), 200);

        let barbers: Value = response.json();
        let barbers = barbers.as_array().unwrap();
        assert_eq!(barbers.len(), 2);
        assert_eq!(barbers[0]["id"], "PEREIRA");
        assert_eq!(barbers[1]["contact_link"], "https://wa.me/5546999746619");
        assert_eq!(barbers[0]["schedule"][0]["segments"][0]["start"], "08:00");
        assert_eq!(barbers[0]["schedule"][0]["segments"][0]["end"], "11:30");
        assert_eq!(barbers[0]["schedule"][1]["segments"], json!([]));
    }

    #[tokio::test]
    async fn test_list_services_filters_by_barber() {
        let (server, _) = setup_test_server(false);

        let all: Value = server.get("/api/services").await.json();
        assert_eq!(all.as_array().unwrap().len(), 7);

        let pereira: Value = server
            .get("/api/services")
            .add_query_param("barber", "PEREIRA")
            .await
            .json();
        let ids: Vec<&str> = pereira
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap())
            .collect();
        assert!(!ids.contains(&"FEM_CURTO"));
        assert!(!ids.contains(&"FEM_LONGO"));
        assert_eq!(pereira[1]["price_label"], "R$ 30,00");

        let japa: Value = server
            .get("/api/services")
            .add_query_param("barber", "JAPA")
            .await
            .json();
        assert_eq!(japa.as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_list_services_unknown_barber() {
        let (server, _) = setup_test_server(false);

        let response = server
            .get("/api/services")
            .add_query_param("barber", "NOBODY")
            .await;

        assert_eq!(response.status_code().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_list_slots() {
        let (server, _) = setup_test_server(false);

        let response = server
            .get("/api/slots")
            .add_query_param("barber", "JAPA")
            .add_query_param("date", tuesday().format("%Y-%m-%d").to_string())
            .await;
        assert_eq!(response.status_code().as_u16(), 200);

        let body: Value = response.json();
        assert_eq!(body["barber_id"], "JAPA");
        assert_eq!(body["date"], "2025-04-01");
        assert_eq!(body["slot_minutes"], 40);
        assert_eq!(
            body["slots"],
            json!(["14:00", "14:40", "15:20", "16:00", "16:40", "17:20", "18:00"])
        );
    }

    #[tokio::test]
    async fn test_list_slots_closed_days() {
        let (server, _) = setup_test_server(false);

        for date in [saturday(), sunday()] {
            let body: Value = server
                .get("/api/slots")
                .add_query_param("barber", "PEREIRA")
                .add_query_param("date", date.format("%Y-%m-%d").to_string())
                .await
                .json();
            assert_eq!(body["slots"], json!([]));
        }
    }

    #[tokio::test]
    async fn test_list_slots_rejects_bad_input() {
        let (server, _) = setup_test_server(false);

        let unknown = server
            .get("/api/slots")
            .add_query_param("barber", "NOBODY")
            .add_query_param("date", "2025-04-01")
            .await;
        assert_eq!(unknown.status_code().as_u16(), 404);

        let bad_date = server
            .get("/api/slots")
            .add_query_param("barber", "JAPA")
            .add_query_param("date", "01/04/2025")
            .await;
        assert_eq!(bad_date.status_code().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_submit_booking() {
        let (server, opened) = setup_test_server(false);

        let response = server
            .post("/api/bookings")
            .json(&booking_json("JAPA", "BARBA", "14:00", "Ana", "46999998888"))
            .await;
        assert_eq!(response.status_code().as_u16(), 200);

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Agendamento enviado via WhatsApp para o barbeiro.");

        let link = body["whatsapp_link"].as_str().unwrap();
        assert!(link.starts_with("https://wa.me/5546999746619?text="));
        let decoded = percent_decode_str(link).decode_utf8().unwrap();
        assert!(decoded.contains("Procedimento: Barba"));
        assert!(decoded.contains("às 14:00"));

        assert_eq!(opened.all(), vec![link.to_string()]);
    }

    #[tokio::test]
    async fn test_submit_incomplete_booking() {
        let (server, opened) = setup_test_server(false);

        let response = server
            .post("/api/bookings")
            .json(&booking_json("JAPA", "BARBA", "14:00", "", "46999998888"))
            .await;
        assert_eq!(response.status_code().as_u16(), 422);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["missing"], json!(["customer_name"]));
        assert_eq!(
            body["message"],
            "Preencha nome, telefone, procedimento e horário antes de confirmar."
        );
        assert!(opened.all().is_empty());
    }

    #[tokio::test]
    async fn test_submit_restricted_service_with_wrong_barber() {
        let (server, opened) = setup_test_server(false);

        let response = server
            .post("/api/bookings")
            .json(&booking_json("PEREIRA", "FEM_CURTO", "14:00", "Ana", "46999998888"))
            .await;
        assert_eq!(response.status_code().as_u16(), 422);

        let body: Value = response.json();
        assert_eq!(body["missing"], json!(["service"]));
        assert!(opened.all().is_empty());
    }

    #[tokio::test]
    async fn test_submit_unknown_service() {
        let (server, _) = setup_test_server(false);

        let response = server
            .post("/api/bookings")
            .json(&booking_json("JAPA", "MASSAGE", "14:00", "Ana", "46999998888"))
            .await;

        assert_eq!(response.status_code().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_production_hides_api() {
        let (server, _) = setup_test_server(true);

        assert_eq!(server.get("/api/barbers").await.status_code().as_u16(), 404);
        assert_eq!(server.get("/health").await.status_code().as_u16(), 200);
        assert_eq!(server.get("/").await.status_code().as_u16(), 200);
    }
}
