use contacts_web::api::errors::ApiError;
use contacts_web::api::mock::MockApi;
use contacts_web::api::AuthSession;
use contacts_web::domain::contact::{Address, Contact};
use contacts_web::domain::types::ContactId;
use contacts_web::domain::user::User;
use contacts_web::forms::auth::{SignInForm, SignUpForm};
use contacts_web::forms::contact::ContactForm;
use contacts_web::services::auth::{sign_in, sign_up};
use contacts_web::services::contact::{delete_contact, load_contact, save_contact, SaveOutcome};
use contacts_web::services::ServiceError;

fn sample_contact(id: &str) -> Contact {
    Contact {
        id: ContactId::new(id).unwrap(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "555".to_string(),
        address: Address {
            street: "1 Main St".to_string(),
            city: "Boston".to_string(),
            state: "MA".to_string(),
            zip: "02110".to_string(),
        },
        app: "contacts-app".to_string(),
        created_by: None,
        created_at: None,
        modified_by: None,
        modified_at: None,
    }
}

fn sample_user() -> User {
    User {
        id: "u1".to_string(),
        email: "ada@example.com".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        created_at: None,
    }
}

fn filled_form(id: &str) -> ContactForm {
    ContactForm {
        id: id.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "555".to_string(),
        street: "1 Main St".to_string(),
        city: "Boston".to_string(),
        state: "MA".to_string(),
        zip: "02110".to_string(),
        app: "contacts-app".to_string(),
    }
}

#[tokio::test]
async fn save_rejects_incomplete_form_before_any_request() {
    // No expectations: any call on the mock would fail the test.
    let api = MockApi::new();
    let mut form = filled_form("");
    form.email = String::new();

    let err = save_contact(&api, &form).await.unwrap_err();
    assert!(matches!(err, ServiceError::Form(_)));
}

#[tokio::test]
async fn save_without_id_creates() {
    let mut api = MockApi::new();
    api.expect_create_contact()
        .withf(|payload| payload.first_name == "Ada")
        .times(1)
        .returning(|_| Ok(sample_contact("new-1")));

    let outcome = save_contact(&api, &filled_form("")).await.unwrap();
    match outcome {
        SaveOutcome::Created(contact) => assert_eq!(contact.id.as_str(), "new-1"),
        other => panic!("expected create, got {other:?}"),
    }
}

#[tokio::test]
async fn save_with_id_updates() {
    let mut api = MockApi::new();
    api.expect_update_contact()
        .withf(|id, _| id.as_str() == "c42")
        .times(1)
        .returning(|_, _| Ok(sample_contact("c42")));

    let outcome = save_contact(&api, &filled_form("c42")).await.unwrap();
    assert!(matches!(outcome, SaveOutcome::Updated(_)));
}

#[tokio::test]
async fn save_surfaces_remote_failure() {
    let mut api = MockApi::new();
    api.expect_create_contact().returning(|_| {
        Err(ApiError::Status {
            status: 502,
            message: "upstream down".to_string(),
        })
    });

    let err = save_contact(&api, &filled_form("")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Api(_)));
}

#[tokio::test]
async fn load_maps_missing_contact_to_not_found() {
    let mut api = MockApi::new();
    api.expect_get_contact_by_id().returning(|_| Ok(None));

    let err = load_contact(&api, "c42").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
}

#[tokio::test]
async fn load_rejects_blank_id_without_a_request() {
    let api = MockApi::new();
    let err = load_contact(&api, "   ").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
}

#[tokio::test]
async fn delete_returns_the_remote_confirmation() {
    let mut api = MockApi::new();
    api.expect_delete_contact()
        .withf(|id| id.as_str() == "c42")
        .times(1)
        .returning(|_| Ok("Contact deleted".to_string()));

    let message = delete_contact(&api, "c42").await.unwrap();
    assert_eq!(message, "Contact deleted");
}

#[tokio::test]
async fn sign_in_rejects_empty_credentials_before_any_request() {
    let api = MockApi::new();
    let form = SignInForm {
        username: String::new(),
        password: "secret".to_string(),
    };

    let err = sign_in(&api, &form).await.unwrap_err();
    assert!(matches!(err, ServiceError::Form(_)));
}

#[tokio::test]
async fn sign_in_returns_the_remote_session() {
    let mut api = MockApi::new();
    api.expect_login()
        .withf(|username, password| username == "ada@example.com" && password == "secret")
        .times(1)
        .returning(|_, _| {
            Ok(AuthSession {
                access_token: "token-1".to_string(),
                user: sample_user(),
            })
        });

    let form = SignInForm {
        username: " ada@example.com ".to_string(),
        password: "secret".to_string(),
    };
    let session = sign_in(&api, &form).await.unwrap();
    assert_eq!(session.access_token, "token-1");
    assert_eq!(session.user.full_name(), "Ada Lovelace");
}

#[tokio::test]
async fn sign_in_maps_rejected_credentials() {
    let mut api = MockApi::new();
    api.expect_login()
        .returning(|_, _| Err(ApiError::Unauthorized));

    let form = SignInForm {
        username: "ada@example.com".to_string(),
        password: "wrong".to_string(),
    };
    let err = sign_in(&api, &form).await.unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized));
}

#[tokio::test]
async fn sign_up_registers_the_trimmed_account() {
    let mut api = MockApi::new();
    api.expect_register()
        .withf(|new_user| new_user.email == "ada@example.com" && new_user.first_name == "Ada")
        .times(1)
        .returning(|_| Ok(sample_user()));

    let form = SignUpForm {
        email: " ada@example.com ".to_string(),
        password: "secret".to_string(),
        first_name: " Ada ".to_string(),
        last_name: "Lovelace".to_string(),
    };
    let user = sign_up(&api, &form).await.unwrap();
    assert_eq!(user.id, "u1");
}
