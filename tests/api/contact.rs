use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{valid_body, TestApp};
use contact_mailer::client::contact_form::{ContactForm, SubmitAttempt};
use contact_mailer::client::form_client::{FormClient, FormValues};
use contact_mailer::domain::form_field::FormField;

#[tokio::test]
async fn contact_returns_200_when_body_is_valid() {
    let test_app = TestApp::spawn_app().await;

    test_app.email_provider_accepts(1).await;

    let response = test_app.post_contact(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();

    assert_eq!(
        body,
        serde_json::json!({
            "success": true,
            "message": "Email sent successfully to both addresses!"
        })
    );
}

#[tokio::test]
async fn contact_sends_one_email_to_recipient_with_cc_and_submitter_as_reply_to() {
    let test_app = TestApp::spawn_app().await;

    test_app.email_provider_accepts(1).await;
    test_app.post_contact(&valid_body()).await;

    let received_requests = &test_app.email_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received_requests[0].body).unwrap();
    let personalization = &body["personalizations"][0];

    assert_eq!(received_requests.len(), 1);
    assert_eq!(
        personalization["to"][0]["email"],
        test_app.config.contact.recipient.as_str()
    );
    assert_eq!(
        personalization["cc"][0]["email"],
        test_app.config.contact.cc.as_str()
    );
    assert_eq!(body["from"]["email"], "a@b.com");
    assert_eq!(body["from"]["name"], "Al");
    assert_eq!(body["reply_to"]["email"], "a@b.com");
    assert_eq!(body["subject"], "Hello there");
    assert!(body["content"][0]["value"]
        .as_str()
        .unwrap()
        .contains("This is a message."));
}

#[tokio::test]
async fn contact_escapes_markup_in_the_email_body() {
    let test_app = TestApp::spawn_app().await;

    test_app.email_provider_accepts(1).await;

    let mut body = valid_body();
    body[3] = ("message", "<img src=x onerror=alert(1)> hello");
    test_app.post_contact(&body).await;

    let received_requests = &test_app.email_server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&received_requests[0].body).unwrap();
    let html = sent["content"][0]["value"].as_str().unwrap();

    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt; hello"));
}

#[tokio::test]
async fn contact_accepts_messages_larger_than_the_default_form_limit() {
    let test_app = TestApp::spawn_app().await;

    test_app.email_provider_accepts(1).await;

    let long_message = "a".repeat(20_000);
    let body = [
        ("name", "Al"),
        ("email", "a@b.com"),
        ("subject", "Hello there"),
        ("message", long_message.as_str()),
    ];

    let response = test_app.post_contact(&body).await;

    assert_eq!(200, response.status().as_u16());

    let received_requests = &test_app.email_server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&received_requests[0].body).unwrap();

    assert!(sent["content"][0]["value"]
        .as_str()
        .unwrap()
        .contains(long_message.as_str()));
}

#[tokio::test]
async fn contact_returns_400_with_every_violation() {
    let test_app = TestApp::spawn_app().await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases: Vec<(Vec<(&str, &str)>, Vec<&str>, &str)> = vec![
        (
            vec![],
            vec![
                "Name is required",
                "Email is required",
                "Subject is required",
                "Message is required",
            ],
            "missing body parameters",
        ),
        (
            vec![
                ("name", ""),
                ("email", "a@b.com"),
                ("subject", "Hello there"),
                ("message", "This is a message."),
            ],
            vec!["Name is required"],
            "empty name",
        ),
        (
            vec![
                ("name", "Al"),
                ("email", "a@b"),
                ("subject", "   "),
                ("message", "This is a message."),
            ],
            vec!["Invalid email format", "Subject is required"],
            "invalid email and blank subject",
        ),
    ];

    Mock::given(any())
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    for (invalid_body, expected_details, description) in test_cases {
        let response = test_app.post_contact(&invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            description
        );

        let body: serde_json::Value = response.json().await.unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "error": "Validation failed",
                "details": expected_details
            }),
            "Unexpected details when payload was {}",
            description
        );
    }

    assert!(test_app.mail_log_lines().is_empty());
}

#[tokio::test]
async fn contact_returns_400_json_when_body_cannot_be_decoded() {
    let test_app = TestApp::spawn_app().await;

    let response = reqwest::Client::new()
        .post(test_app.contact_url())
        .header("Content-Type", "application/json")
        .body(r#"{"name": "Al"}"#)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();

    assert_eq!(body["error"], "Validation failed");
}

#[tokio::test]
async fn contact_returns_500_when_the_email_provider_fails() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_contact(&valid_body()).await;

    assert_eq!(500, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();

    assert_eq!(
        body,
        serde_json::json!({
            "success": false,
            "error": "Failed to send email",
            "message": "There was an error sending your message. Please try again."
        })
    );
}

#[tokio::test]
async fn contact_logs_each_delivery_attempt() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(202))
        .up_to_n_times(1)
        .mount(&test_app.email_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&test_app.email_server)
        .await;

    test_app.post_contact(&valid_body()).await;
    test_app.post_contact(&valid_body()).await;

    let lines = test_app.mail_log_lines();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(&format!(
        " - Email sent successfully from: a@b.com (Al) to: {} (CC: {})",
        test_app.config.contact.recipient, test_app.config.contact.cc
    )));
    assert!(lines[1].ends_with(" - Email failed to send from: a@b.com (Al)"));
}

#[tokio::test]
async fn concurrent_submissions_append_complete_lines() {
    const SUBMISSIONS: usize = 16;

    let test_app = TestApp::spawn_app().await;

    test_app.email_provider_accepts(SUBMISSIONS as u64).await;

    let handles: Vec<_> = (0..SUBMISSIONS)
        .map(|_| {
            let url = test_app.contact_url();
            tokio::spawn(async move {
                reqwest::Client::new()
                    .post(url)
                    .form(&valid_body())
                    .send()
                    .await
                    .expect("Failed to execute request.")
            })
        })
        .collect();

    for handle in handles {
        let response = handle.await.unwrap();

        assert_eq!(200, response.status().as_u16());
    }

    let lines = test_app.mail_log_lines();

    assert_eq!(lines.len(), SUBMISSIONS);
    for line in lines {
        assert!(line.contains(" - Email sent successfully from: a@b.com (Al) to: "));
        assert!(line.ends_with(')'));
    }
}

#[tokio::test]
async fn non_post_methods_are_rejected_with_405() {
    let test_app = TestApp::spawn_app().await;
    let client = reqwest::Client::new();

    for request in [
        client.get(test_app.contact_url()),
        client.put(test_app.contact_url()),
        client.delete(test_app.contact_url()),
    ] {
        let response = request.send().await.expect("Failed to execute request.");

        assert_eq!(405, response.status().as_u16());

        let body: serde_json::Value = response.json().await.unwrap();

        assert_eq!(body, serde_json::json!({"error": "Method not allowed"}));
    }
}

#[tokio::test]
async fn responses_are_json_and_allow_any_origin() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.post_contact(&[]).await;
    let headers = response.headers();

    assert_eq!(headers["Content-Type"], "application/json");
    assert_eq!(headers["Access-Control-Allow-Origin"], "*");
    assert_eq!(headers["Access-Control-Allow-Methods"], "POST");
    assert_eq!(headers["Access-Control-Allow-Headers"], "Content-Type");
}

#[tokio::test]
async fn form_client_submission_is_delivered_end_to_end() {
    let test_app = TestApp::spawn_app().await;

    test_app.email_provider_accepts(1).await;

    let client = FormClient::new(test_app.contact_url()).unwrap();
    let mut form = ContactForm::new(client);

    form.set_value(FormField::Name, "Al");
    form.set_value(FormField::Email, "a@b.com");
    form.set_value(FormField::Subject, "Hello there");
    form.set_value(FormField::Message, "This is a message.");

    let attempt = form.submit().await;

    match attempt {
        SubmitAttempt::Delivered(delivered) => assert_eq!(
            delivered.message.as_deref(),
            Some("Email sent successfully to both addresses!")
        ),
        other => panic!("Expected the submission to be delivered, got {:?}", other),
    }
    assert_eq!(form.values(), &FormValues::default());
}
