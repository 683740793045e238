use biscuit::SingleOrMultiple;
use identity_broker::{
    claims::TokenClaims,
    context::BrokeredIdentityContext,
    error::{BrokerError, UserStoreError},
    mapper::{IdentityProviderMapper, MapperDescriptor},
    model::{MapperModel, SyncMode},
    session::{Realm, Session},
    user::{InMemoryUser, UserModel},
};
use prefixed_attribute_mapper::{PrefixedUserAttributeMapper, ATTRIBUTE_PREFIX, CLAIM, PROVIDER_ID, USER_ATTRIBUTE};
use serde_json::{json, Value};

/// A user recording every write it receives.
#[derive(Default)]
struct RecordingUser {
    user: InMemoryUser,
    writes: Vec<String>,
    fail: bool,
}

impl RecordingUser {
    fn with_attribute(name: &str, values: &[&str]) -> Self {
        let mut user = InMemoryUser::new("user-1");
        user.attributes
            .insert(name.to_string(), values.iter().map(ToString::to_string).collect());
        Self {
            user,
            ..Default::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn record(&mut self, write: String) -> Result<(), UserStoreError> {
        if self.fail {
            return Err(UserStoreError::ReadOnly(write));
        }
        self.writes.push(write);
        Ok(())
    }
}

impl UserModel for RecordingUser {
    fn id(&self) -> &str {
        self.user.id()
    }

    fn set_email(&mut self, email: String) -> Result<(), UserStoreError> {
        self.record(format!("email={email}"))?;
        self.user.set_email(email)
    }

    fn set_first_name(&mut self, first_name: String) -> Result<(), UserStoreError> {
        self.record(format!("firstName={first_name}"))?;
        self.user.set_first_name(first_name)
    }

    fn set_last_name(&mut self, last_name: String) -> Result<(), UserStoreError> {
        self.record(format!("lastName={last_name}"))?;
        self.user.set_last_name(last_name)
    }

    fn attribute_values(&self, name: &str) -> Vec<String> {
        self.user.attribute_values(name)
    }

    fn set_attribute(&mut self, name: &str, values: Vec<String>) -> Result<(), UserStoreError> {
        self.record(format!("set {name}"))?;
        self.user.set_attribute(name, values)
    }

    fn remove_attribute(&mut self, name: &str) -> Result<(), UserStoreError> {
        self.record(format!("remove {name}"))?;
        self.user.remove_attribute(name)
    }
}

fn mapper_model(claim: &str, attribute: &str, prefix: Option<&str>) -> MapperModel {
    let mut model = MapperModel {
        id: "m-1".into(),
        name: "test-mapper".into(),
        identity_provider_alias: "corp".into(),
        identity_provider_mapper: PROVIDER_ID.into(),
        ..Default::default()
    };
    model.config.insert(CLAIM.into(), claim.into());
    model.config.insert(USER_ATTRIBUTE.into(), attribute.into());
    if let Some(prefix) = prefix {
        model.config.insert(ATTRIBUTE_PREFIX.into(), prefix.into());
    }
    model
}

fn context(user_info: Value) -> BrokeredIdentityContext {
    let _ = env_logger::try_init();
    BrokeredIdentityContext::new("external-1")
        .with_identity_provider_alias("corp")
        .with_user_info(user_info)
}

fn session() -> Session {
    Session {
        id: "session-1".into(),
    }
}

fn import(model: &MapperModel, context: &mut BrokeredIdentityContext) {
    PrefixedUserAttributeMapper
        .preprocess_federated_identity(&session(), &Realm::new("test"), model, context)
        .expect("import must not fail");
}

fn update(model: &MapperModel, user: &mut RecordingUser, context: &BrokeredIdentityContext) -> Result<(), BrokerError> {
    PrefixedUserAttributeMapper.update_brokered_user(&session(), &Realm::new("test"), user, model, context)
}

#[test]
fn import_nested_claim_into_attribute() {
    let model = mapper_model("address.locality", "city", Some("loc-"));
    let mut context = context(json!({"address": {"locality": "Paris"}}));

    import(&model, &mut context);

    assert_eq!(context.user_attribute("city"), Some(&["loc-Paris".to_string()][..]));
}

#[test]
fn import_first_value_into_email() {
    let model = mapper_model("groups", "email", Some(""));
    let mut context = context(json!({"groups": ["a@x.com", "b@x.com"]}));

    import(&model, &mut context);

    assert_eq!(context.email(), Some("a@x.com"));
    assert!(context.attributes().is_empty());
}

#[test]
fn import_reserved_fields_ignore_case() {
    let mut context = context(json!({"given": "Jane", "family": ["Doe", "Smith"]}));

    import(&mapper_model("given", "FIRSTNAME", Some("Dr. ")), &mut context);
    import(&mapper_model("family", "lastname", None), &mut context);

    assert_eq!(context.first_name(), Some("Dr. Jane"));
    assert_eq!(context.last_name(), Some("Doe"));
}

#[test]
fn import_all_values_into_attribute() {
    let model = mapper_model("groups", "groups", Some("corp:"));
    let mut context = context(json!({"groups": ["admins", null, "users", 7]}));

    import(&model, &mut context);

    assert_eq!(
        context.user_attribute("groups"),
        Some(&["corp:admins".to_string(), "corp:users".to_string(), "corp:7".to_string()][..])
    );
}

#[test]
fn import_missing_claim_touches_nothing() {
    let mut context = context(json!({"name": "Jane"}));

    import(&mapper_model("address.locality", "city", Some("loc-")), &mut context);
    import(&mapper_model("mail", "email", None), &mut context);
    import(&mapper_model("groups", "groups", None), &mut context);

    assert_eq!(context, self::context(json!({"name": "Jane"})));
}

#[test]
fn import_without_target_touches_nothing() {
    let mut context = context(json!({"mail": "jane@example.com"}));

    import(&mapper_model("mail", "", None), &mut context);

    let mut model = mapper_model("mail", "email", None);
    model.config.remove(USER_ATTRIBUTE);
    import(&model, &mut context);

    assert_eq!(context.email(), None);
    assert!(context.attributes().is_empty());
}

#[test]
fn import_escaped_claim_from_token() {
    let token = TokenClaims {
        azp: None,
        sub: "external-1".into(),
        iss: url::Url::parse("https://sso.example.com/realms/corp").expect("valid url"),
        aud: Some(SingleOrMultiple::Multiple(vec!["broker".into(), "api".into()])),
        exp: 1_700_000_600,
        iat: 1_700_000_000,
        auth_time: None,
        scope: String::new(),
        extended_claims: json!({"https://example.com/roles": ["reader", "writer"]})
            .as_object()
            .cloned()
            .unwrap_or_default(),
    };
    let mut context = context(json!({"https://example.com/roles": ["ignored"]})).with_id_token(token);

    import(&mapper_model(r"https://example\.com/roles", "roles", Some("r-")), &mut context);
    import(&mapper_model("aud", "audience", None), &mut context);

    assert_eq!(
        context.user_attribute("roles"),
        Some(&["r-reader".to_string(), "r-writer".to_string()][..])
    );
    assert_eq!(
        context.user_attribute("audience"),
        Some(&["broker".to_string(), "api".to_string()][..])
    );
}

#[test]
fn import_claim_with_backslash_in_name() {
    let model = mapper_model(r"CORP\jdoe.groups", "groups", Some("corp:"));
    let mut context = context(json!({r"CORP\jdoe": {"groups": ["staff", "admins"]}}));

    import(&model, &mut context);

    assert_eq!(
        context.user_attribute("groups"),
        Some(&["corp:staff".to_string(), "corp:admins".to_string()][..])
    );
}

#[test]
fn update_sets_changed_attribute() {
    let model = mapper_model("address.locality", "city", Some("loc-"));
    let context = context(json!({"address": {"locality": "Paris"}}));
    let mut user = RecordingUser::with_attribute("city", &["loc-Lyon"]);

    update(&model, &mut user, &context).expect("update");

    assert_eq!(user.writes, vec!["set city"]);
    assert_eq!(user.attribute_values("city"), vec!["loc-Paris"]);
}

#[test]
fn update_is_idempotent() {
    let model = mapper_model("groups", "groups", Some("g-"));
    let context = context(json!({"groups": ["a", "b"]}));
    let mut user = RecordingUser::default();

    update(&model, &mut user, &context).expect("first update");
    update(&model, &mut user, &context).expect("second update");

    assert_eq!(user.writes, vec!["set groups"]);
    assert_eq!(user.attribute_values("groups"), vec!["g-a", "g-b"]);
}

#[test]
fn update_ignores_order() {
    let model = mapper_model("groups", "groups", Some("g-"));
    let context = context(json!({"groups": ["a", "b"]}));
    let mut user = RecordingUser::with_attribute("groups", &["g-b", "g-a"]);

    update(&model, &mut user, &context).expect("update");

    assert!(user.writes.is_empty());
}

#[test]
fn update_removes_attribute_when_claim_is_gone() {
    let model = mapper_model("groups", "groups", Some("g-"));
    let context = context(json!({"groups": [null]}));
    let mut user = RecordingUser::with_attribute("groups", &["g-a"]);

    update(&model, &mut user, &context).expect("update");
    update(&model, &mut user, &context).expect("update");

    assert_eq!(user.writes, vec!["remove groups"]);
    assert!(user.attribute_values("groups").is_empty());
}

#[test]
fn update_reserved_field_with_first_value() {
    let model = mapper_model("mails", "Email", Some("x-"));
    let context = context(json!({"mails": ["a@x.com", "b@x.com"]}));
    let mut user = RecordingUser::default();

    update(&model, &mut user, &context).expect("update");

    assert_eq!(user.writes, vec!["email=x-a@x.com"]);
    assert_eq!(user.user.email.as_deref(), Some("x-a@x.com"));
}

#[test]
fn update_reserved_field_without_value() {
    let model = mapper_model("missing", "lastName", None);
    let context = context(json!({}));
    let mut user = RecordingUser::default();
    user.user.last_name = Some("Doe".into());

    update(&model, &mut user, &context).expect("update");

    assert!(user.writes.is_empty());
    assert_eq!(user.user.last_name.as_deref(), Some("Doe"));
}

#[test]
fn update_without_target_touches_nothing() {
    let model = mapper_model("groups", "", None);
    let context = context(json!({"groups": ["a"]}));
    let mut user = RecordingUser::with_attribute("groups", &["old"]);

    update(&model, &mut user, &context).expect("update");

    assert!(user.writes.is_empty());
    assert_eq!(user.attribute_values("groups"), vec!["old"]);
}

#[test]
fn update_propagates_store_failure() {
    let model = mapper_model("given", "firstName", None);
    let context = context(json!({"given": "Jane"}));
    let mut user = RecordingUser::failing();

    let result = update(&model, &mut user, &context);

    assert!(matches!(
        result,
        Err(BrokerError::UserStore(UserStoreError::ReadOnly(write))) if write == "firstName=Jane"
    ));
}

#[test]
fn describe_mapper() {
    let descriptor = MapperDescriptor::of(&PrefixedUserAttributeMapper);

    assert_eq!(descriptor.id, PROVIDER_ID);
    assert_eq!(descriptor.compatible_providers, vec!["keycloak-oidc", "oidc"]);
    assert_eq!(descriptor.sync_modes, SyncMode::ALL.to_vec());
    assert_eq!(descriptor.properties.len(), 3);
}
