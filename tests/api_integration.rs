// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the LVI cloud client using wiremock.

use std::time::Duration;

use lvi_lib::{
    Client, ClientConfig, DeviceId, Error, Preset, PrunePolicy, ProtocolError, Variant, ZoneNumber,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

const PASSWORD_MD5: &str = "5ebe2294ecd0e0f08eab7690d2a6ee69";

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": {"code": "1", "key": "OK", "value": "OK"},
        "data": data,
    }))
}

fn code(code: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": {"code": code, "key": "ERR", "value": "Something went wrong"},
        "data": {},
    }))
}

fn login_ok(token: &str) -> ResponseTemplate {
    login_expiring(token, "2099-12-31 23:59:59")
}

fn login_expiring(token: &str, expire: &str) -> ResponseTemplate {
    ok(json!({
        "token": token,
        "user_infos": {"user_id": "42", "token_expire": expire},
    }))
}

fn homes() -> ResponseTemplate {
    ok(json!({"smarthomes": [{"smarthome_id": "55", "label": "Maison"}]}))
}

fn home_data() -> ResponseTemplate {
    ok(json!({
        "zones": [{"num_zone": "1", "zone_label": "Salon"}],
        "devices": [
            {
                "id": "7",
                "id_device": "C001",
                "nom_appareil": "Radiateur salon",
                "num_zone": "1",
                "smarthome_id": "55",
                "current_temp": "662",
                "consigne_confort": "716",
                "consigne_hg": "446",
                "consigne_eco": "554",
                "consigne_boost": "770",
                "consigne_manuel": "716",
                "gv_mode": "0",
                "nv_mode": "0",
                "fan_speed": "3"
            },
            {
                "id": "8",
                "id_device": "C002",
                "nom_appareil": "Radiateur chambre",
                "num_zone": "2",
                "smarthome_id": "55",
                "consigne_manuel": "0",
                "gv_mode": "1",
                "nv_mode": "0",
                "fan_speed": "0"
            }
        ],
    }))
}

fn errors() -> ResponseTemplate {
    ok(json!({"errors": [{"id_device": "C002"}]}))
}

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(server.uri())
        .with_offline_backoff(Duration::from_millis(10))
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/user/auth"))
        .respond_with(login_ok("tok-1"))
        .mount(server)
        .await;
}

async fn mount_topology(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/user/read"))
        .respond_with(homes())
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/smarthome/errors"))
        .respond_with(errors())
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/smarthome/read"))
        .respond_with(home_data())
        .mount(server)
        .await;
}

async fn connected(config: ClientConfig) -> Client {
    Client::builder("me@example.com", "secret")
        .config(config)
        .build()
        .await
        .unwrap()
}

// ============================================================================
// Session
// ============================================================================

mod session {
    use super::*;

    #[tokio::test]
    async fn form_login_sends_password_digest() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .and(body_string_contains("email=me%40example.com"))
            .and(body_string_contains(PASSWORD_MD5))
            .respond_with(login_ok("tok-1"))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected(config(&server)).await;

        assert!(client.is_authenticated());
        assert_eq!(client.session().token(), Some("tok-1"));
        assert_eq!(client.session().user_id(), Some("42"));
        assert!(client.session().token_expiry().is_some());
    }

    #[tokio::test]
    async fn rejected_credentials_fail_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(code("3"))
            .expect(1)
            .mount(&server)
            .await;

        let result = Client::builder("me@example.com", "wrong")
            .config(config(&server))
            .build()
            .await;

        assert!(matches!(result, Err(Error::Authentication(_))));
    }

    #[tokio::test]
    async fn login_without_expiry_is_rejected_on_form_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(ok(json!({"token": "t", "user_infos": {"user_id": "42"}})))
            .mount(&server)
            .await;

        let result = Client::builder("me@example.com", "secret")
            .config(config(&server))
            .build()
            .await;

        assert!(matches!(result, Err(Error::Authentication(_))));
    }

    #[tokio::test]
    async fn non_json_login_body_is_an_authentication_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let result = Client::builder("me@example.com", "secret")
            .config(config(&server))
            .build()
            .await;

        assert!(matches!(result, Err(Error::Authentication(_))));
    }

    #[tokio::test]
    async fn login_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        mount_login(&server).await;

        let client = connected(config(&server)).await;
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn requests_without_session_fail_locally() {
        let server = MockServer::start().await;

        let mut client = Client::builder("me@example.com", "secret")
            .config(config(&server))
            .build_without_auth()
            .unwrap();

        let result = client.list_homes().await;

        assert!(matches!(result, Err(Error::NoSession)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn close_drops_the_session() {
        let server = MockServer::start().await;
        mount_login(&server).await;

        let mut client = connected(config(&server)).await;
        client.close();

        assert!(!client.is_authenticated());
        assert!(matches!(client.list_homes().await, Err(Error::NoSession)));
    }
}

// ============================================================================
// Request executor
// ============================================================================

mod executor {
    use super::*;

    #[tokio::test]
    async fn timeouts_consume_the_whole_budget() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(homes().set_delay(Duration::from_secs(2)))
            .expect(3)
            .mount(&server)
            .await;

        let config = config(&server)
            .with_timeout(Duration::from_millis(200))
            .with_request_attempts(3);
        let mut client = connected(config).await;

        let result = client.list_homes().await;

        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::Timeout(_)))
        ));
    }

    #[tokio::test]
    async fn rejected_token_triggers_one_login_and_a_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(login_ok("tok-1"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(login_ok("tok-2"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .and(body_string_contains("token=tok-1"))
            .respond_with(code("3"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .and(body_string_contains("token=tok-2"))
            .respond_with(homes())
            .expect(1)
            .mount(&server)
            .await;

        let mut client = connected(config(&server)).await;
        let homes = client.list_homes().await.unwrap();

        assert_eq!(homes.len(), 1);
        assert_eq!(client.session().token(), Some("tok-2"));
    }

    #[tokio::test]
    async fn failed_relogin_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(login_ok("tok-1"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(code("3"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(code("3"))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = connected(config(&server)).await;
        let result = client.list_homes().await;

        assert!(matches!(result, Err(Error::Authentication(_))));
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn offline_device_is_retried_after_backoff() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(code("2"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(homes())
            .expect(1)
            .mount(&server)
            .await;

        let mut client = connected(config(&server)).await;

        assert_eq!(client.list_homes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn service_error_is_not_retried() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(code("99"))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = connected(config(&server)).await;
        let result = client.list_homes().await;

        match result {
            Err(Error::Service { code, message }) => {
                assert_eq!(code, "99");
                assert_eq!(message, "Something went wrong");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_body_is_no_data() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = connected(config(&server)).await;

        assert!(client.list_homes().await.unwrap().is_empty());
        assert!(client.home().is_none());
    }

    #[tokio::test]
    async fn signed_backend_signs_every_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .and(body_string_contains("password=secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"token": "sig-tok", "userId": 9}})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .and(header("X-Zc-User-Id", "9"))
            .and(header("X-Zc-Timeout", "300"))
            .and(header_exists("X-Zc-Timestamp"))
            .and(header_exists("X-Zc-Nonce"))
            .and(header_exists("X-Zc-User-Signature"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"smarthomes": [{"smarthome_id": 3}]}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = config(&server).with_variant(Variant::Signed);
        let mut client = connected(config).await;
        let homes = client.list_homes().await.unwrap();

        assert_eq!(homes[0].smarthome_id.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn signed_auth_failure_marker_is_a_token_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"token": "sig-tok", "userId": "9"}})),
            )
            .expect(4)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"error":"InterfaceAuthenticationFailure"}"#),
            )
            .expect(3)
            .mount(&server)
            .await;

        let config = config(&server)
            .with_variant(Variant::Signed)
            .with_request_attempts(3);
        let mut client = connected(config).await;

        assert!(matches!(client.list_homes().await, Err(Error::TokenExpired)));
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn rejected_token_on_last_attempt_still_logs_in_again() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(login_ok("tok-1"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(login_ok("tok-2"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(code("3"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .and(body_string_contains("token=tok-2"))
            .respond_with(homes())
            .expect(1)
            .mount(&server)
            .await;

        let config = config(&server).with_request_attempts(1);
        let mut client = connected(config).await;

        assert!(matches!(client.list_homes().await, Err(Error::TokenExpired)));
        assert!(client.is_authenticated());
        assert_eq!(client.list_homes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn locally_expired_token_is_renewed_before_the_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(login_expiring("old-tok", "2000-01-01 00:00:00"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(login_ok("new-tok"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .and(body_string_contains("token=old-tok"))
            .respond_with(code("3"))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .and(body_string_contains("token=new-tok"))
            .respond_with(homes())
            .expect(1)
            .mount(&server)
            .await;

        let mut client = connected(config(&server)).await;
        assert!(!client.is_authenticated());

        assert_eq!(client.list_homes().await.unwrap().len(), 1);
        assert_eq!(client.session().token(), Some("new-tok"));
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn failed_renewal_of_expired_token_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(login_expiring("old-tok", "2000-01-01 00:00:00"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/auth"))
            .respond_with(code("3"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(homes())
            .expect(0)
            .mount(&server)
            .await;

        let mut client = connected(config(&server)).await;

        assert!(matches!(client.list_homes().await, Err(Error::Authentication(_))));
    }
}

// ============================================================================
// Topology and device state
// ============================================================================

mod topology {
    use super::*;

    #[tokio::test]
    async fn refresh_all_builds_rooms_and_heaters() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_topology(&server).await;

        let mut client = connected(config(&server)).await;
        assert!(client.refresh_all().await.unwrap());

        assert_eq!(client.home().and_then(|h| h.label.as_deref()), Some("Maison"));
        let room = client.get_room(ZoneNumber::new(1)).unwrap();
        assert_eq!(room.name.as_deref(), Some("Salon"));

        let living = client.get_device(&DeviceId::new("C001")).unwrap();
        assert_eq!(living.display_name.as_deref(), Some("Radiateur salon"));
        assert_eq!(living.room, Some(ZoneNumber::new(1)));
        assert_eq!(living.current_temp, Some(19));
        assert_eq!(living.comfort_setpoint, Some(22));
        assert_eq!(living.frost_guard_setpoint, Some(7));
        assert_eq!(living.eco_setpoint, Some(13));
        assert_eq!(living.boost_setpoint, Some(25));
        assert_eq!(living.fan_status, 1);
        assert_eq!(living.power_status, 1);
        assert!(living.available);
        assert_eq!(living.preset(), Some(Preset::Comfort));

        // Zone 2 was never listed
        let bedroom = client.get_device(&DeviceId::new("C002")).unwrap();
        assert_eq!(bedroom.room, None);
        assert_eq!(bedroom.zone_number, Some(ZoneNumber::new(2)));
        assert!(!bedroom.available);
        assert_eq!(bedroom.fan_status, 0);
        assert_eq!(bedroom.power_status, 0);
        assert!(!bedroom.is_on());
    }

    #[tokio::test]
    async fn refresh_devices_is_throttled() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(homes())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/smarthome/errors"))
            .respond_with(ok(json!({"errors": []})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/smarthome/read"))
            .respond_with(home_data())
            .expect(1)
            .mount(&server)
            .await;

        let mut client = connected(config(&server)).await;

        assert!(client.refresh_devices().await.unwrap());
        assert!(!client.refresh_devices().await.unwrap());
        assert_eq!(client.heaters().count(), 2);
    }

    #[tokio::test]
    async fn refresh_all_is_throttled_and_reads_the_home_once() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(homes())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/smarthome/errors"))
            .respond_with(errors())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/smarthome/read"))
            .respond_with(home_data())
            .expect(1)
            .mount(&server)
            .await;

        let mut client = connected(config(&server)).await;

        assert!(client.refresh_all().await.unwrap());
        assert!(!client.refresh_all().await.unwrap());
        assert_eq!(client.rooms().count(), 1);
        assert_eq!(client.heaters().count(), 2);
    }

    #[tokio::test]
    async fn full_and_device_refresh_are_throttled_separately() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(homes())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/smarthome/errors"))
            .respond_with(errors())
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/smarthome/read"))
            .respond_with(home_data())
            .expect(2)
            .mount(&server)
            .await;

        let mut client = connected(config(&server)).await;

        assert!(client.refresh_all().await.unwrap());
        assert!(client.refresh_devices().await.unwrap());
        assert!(!client.refresh_devices().await.unwrap());
        assert!(!client.refresh_all().await.unwrap());
    }

    #[tokio::test]
    async fn unthrottled_refresh_reaches_the_service_each_time() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_topology(&server).await;

        let config = config(&server).with_throttle_interval(Duration::ZERO);
        let mut client = connected(config).await;

        assert!(client.refresh_devices().await.unwrap());
        assert!(client.refresh_devices().await.unwrap());
    }

    #[tokio::test]
    async fn pruning_drops_heaters_missing_from_a_refresh() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(homes())
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/smarthome/errors"))
            .respond_with(ok(json!({"errors": []})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/smarthome/read"))
            .respond_with(home_data())
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/smarthome/read"))
            .respond_with(ok(json!({"devices": [{"id_device": "C001", "smarthome_id": "55"}]})))
            .mount(&server)
            .await;

        let config = config(&server)
            .with_throttle_interval(Duration::ZERO)
            .with_prune_policy(PrunePolicy::Prune);
        let mut client = connected(config).await;

        client.refresh_devices().await.unwrap();
        assert_eq!(client.heaters().count(), 2);
        client.refresh_devices().await.unwrap();
        assert_eq!(client.heaters().count(), 1);
        assert!(client.get_device(&DeviceId::new("C002")).is_none());
    }

    #[tokio::test]
    async fn account_without_home() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/user/read"))
            .respond_with(ok(json!({"smarthomes": []})))
            .mount(&server)
            .await;

        let mut client = connected(config(&server)).await;

        assert!(matches!(client.refresh_rooms().await, Err(Error::NoHome)));
    }
}

// ============================================================================
// Commands
// ============================================================================

mod commands {
    use super::*;

    async fn ready(server: &MockServer) -> Client {
        mount_login(server).await;
        mount_topology(server).await;
        let mut client = connected(config(server)).await;
        client.refresh_all().await.unwrap();
        client
    }

    #[tokio::test]
    async fn set_temperature_writes_comfort_and_manual() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query/push"))
            .and(body_string_contains("smarthome_id=55"))
            .and(body_string_contains("query%5Bid_device%5D=C001"))
            .and(body_string_contains("query%5Bconsigne_confort%5D=689"))
            .and(body_string_contains("query%5Bconsigne_manuel%5D=689"))
            .and(body_string_contains("token=tok-1"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        let mut client = ready(&server).await;

        client
            .set_temperature(&DeviceId::new("C001"), 20.5)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn set_preset_follows_preset_setpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query/push"))
            .and(body_string_contains("query%5Bgv_mode%5D=3"))
            .and(body_string_contains("query%5Bnv_mode%5D=3"))
            .and(body_string_contains("query%5Bconsigne_eco%5D=554"))
            .and(body_string_contains("query%5Bconsigne_manuel%5D=554"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        let mut client = ready(&server).await;
        let id = DeviceId::new("C001");

        client.set_preset(&id, "eco").await.unwrap();

        assert_eq!(client.get_device(&id).unwrap().gv_mode, Some(3));
    }

    #[tokio::test]
    async fn boost_preset_carries_duration() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query/push"))
            .and(body_string_contains("query%5Bgv_mode%5D=4"))
            .and(body_string_contains("query%5Bconsigne_boost%5D=770"))
            .and(body_string_contains("query%5Btime_boost%5D=7200"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        let mut client = ready(&server).await;

        client
            .set_preset(&DeviceId::new("C001"), Preset::Boost)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn power_off_zeroes_manual_setpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query/push"))
            .and(body_string_contains("query%5Bgv_mode%5D=1"))
            .and(body_string_contains("query%5Bconsigne_manuel%5D=0"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        let mut client = ready(&server).await;
        let id = DeviceId::new("C001");

        client.set_power(&id, false).await.unwrap();

        assert_eq!(client.get_device(&id).unwrap().gv_mode, Some(1));
    }

    #[tokio::test]
    async fn optimistic_mode_survives_a_failed_push() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query/push"))
            .respond_with(code("99"))
            .expect(1)
            .mount(&server)
            .await;
        let mut client = ready(&server).await;
        let id = DeviceId::new("C001");

        let result = client.set_preset(&id, Preset::FrostGuard).await;

        assert!(matches!(result, Err(Error::Service { .. })));
        assert_eq!(client.get_device(&id).unwrap().gv_mode, Some(2));
    }

    #[tokio::test]
    async fn unknown_device_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query/push"))
            .respond_with(ok(json!({})))
            .expect(0)
            .mount(&server)
            .await;
        let mut client = ready(&server).await;

        let result = client
            .set_temperature(&DeviceId::new("NOPE"), 21.0)
            .await;

        assert!(matches!(result, Err(Error::UnknownDevice(id)) if id.as_str() == "NOPE"));
    }
}

// ============================================================================
// Blocking adapter
// ============================================================================

mod blocking {
    use super::*;

    #[test]
    fn blocking_client_round_trip() {
        let support = tokio::runtime::Runtime::new().unwrap();
        let server = support.block_on(async {
            let server = MockServer::start().await;
            mount_login(&server).await;
            mount_topology(&server).await;
            server
        });

        let builder = Client::builder("me@example.com", "secret").config(config(&server));
        let mut client = lvi_lib::blocking::Client::connect(builder).unwrap();

        assert!(client.refresh_all().unwrap());
        assert_eq!(client.heaters().count(), 2);
        assert_eq!(client.rooms().count(), 1);
        assert!(client.get_device(&DeviceId::new("C001")).is_some());

        client.close();
        assert!(!client.inner().is_authenticated());
    }
}
