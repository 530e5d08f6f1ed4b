use crate::tests::common::fixtures::setup_test_server;

/// Booking page handler tests
#[cfg(test)]
mod page_tests {
    use super::*;
    use crate::handlers::page::escape_html;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Zé" & 'Cia'</b>"#),
            "&lt;b&gt;&quot;Zé&quot; &amp; &#39;Cia&#39;&lt;/b&gt;"
        );
    }

    #[tokio::test]
    async fn test_page_renders_defaults() {
        let (server, _) = setup_test_server(false);

        let response = server.get("/").await;
        assert_eq!(response.status_code().as_u16(), 200);

        let html = response.text();
        assert!(html.contains("BARBIERE DI PEREIRA"));
        assert!(html.contains(r#"<option value="PEREIRA" selected>Pereira</option>"#));
        assert!(html.contains("Cabelo masculino adulto — R$ 35,00"));
        assert!(!html.contains("FEM_CURTO"));
        assert!(html.contains(r#"href="https://wa.me/5546991114797""#));
    }

    #[tokio::test]
    async fn test_page_lists_slots_for_selection() {
        let (server, _) = setup_test_server(false);

        let html = server
            .get("/")
            .add_query_param("barber", "JAPA")
            .add_query_param("date", "2025-04-01")
            .add_query_param("time", "14:40")
            .await
            .text();

        assert!(html.contains(r#"<option value="14:00">14:00</option>"#));
        assert!(html.contains(r#"<option value="14:40" selected>14:40</option>"#));
        assert!(!html.contains(r#"value="08:00""#));
        assert!(html.contains("Corte feminino curto (Somente Japa) — R$ 35,00"));
        assert!(html.contains("<strong>Horário:</strong> 14:40"));
    }

    #[tokio::test]
    async fn test_page_shows_no_slots_notice_on_sunday() {
        let (server, _) = setup_test_server(false);

        let html = server
            .get("/")
            .add_query_param("date", "2025-04-06")
            .await
            .text();

        assert!(html.contains("Nenhum horário disponível para essa data"));
        assert!(html.contains("<strong>Horário:</strong> —"));
    }

    #[tokio::test]
    async fn test_page_clears_service_other_barber_cannot_do() {
        let (server, _) = setup_test_server(false);

        let html = server
            .get("/")
            .add_query_param("barber", "PEREIRA")
            .add_query_param("service", "FEM_LONGO")
            .await
            .text();

        assert!(html.contains(r#"<option value="" selected>-- Escolha um procedimento --</option>"#));
        assert!(html.contains("R$ 0,00"));
    }

    #[tokio::test]
    async fn test_form_submit_incomplete_keeps_fields() {
        let (server, opened) = setup_test_server(false);

        let response = server
            .post("/agendar")
            .form(&[
                ("barber", "JAPA"),
                ("service", "BARBA"),
                ("date", "2025-04-01"),
                ("time", "14:00"),
                ("name", ""),
                ("phone", "46999998888"),
            ])
            .await;

        assert_eq!(response.status_code().as_u16(), 422);
        let html = response.text();
        assert!(html.contains("Preencha nome, telefone, procedimento e horário antes de confirmar."));
        assert!(html.contains(r#"name="phone" value="46999998888""#));
        assert!(html.contains(r#"<option value="14:00" selected>14:00</option>"#));
        assert!(opened.all().is_empty());
    }

    #[tokio::test]
    async fn test_form_submit_escapes_customer_input() {
        let (server, _) = setup_test_server(false);

        let html = server
            .post("/agendar")
            .form(&[("name", "<script>alert(1)</script>"), ("phone", "")])
            .await
            .text();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }
}
