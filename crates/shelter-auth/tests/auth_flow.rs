//! End-to-end flows over the in-memory store

use std::time::Duration;

use shelter_auth::{
    AccessRole, Argon2Hasher, AuthError, AuthService, Authorizer, ConfigBuilder, JwtConfig,
    ListScope, MemoryUserStore, NewUser, Pagination, PasswordHasher, RbacEnforcer, TenantId,
    TokenService, User, UserId, UserService, UserStore, derive_list_scope,
};

const SECRET: &str = "integration-secret-key-at-least-32-bytes";

/// Prefix hasher for fast tests
#[derive(Clone, Copy)]
struct FastHasher;

impl PasswordHasher for FastHasher {
    fn hash(&self, password: &str) -> shelter_auth::Result<String> {
        Ok(format!("fast${password}"))
    }

    fn matches(&self, hash: &str, password: &str) -> bool {
        hash.strip_prefix("fast$") == Some(password)
    }
}

fn token_service() -> TokenService {
    TokenService::new(JwtConfig::new(SECRET).with_realm("shelters")).unwrap()
}

fn seed<H: PasswordHasher>(store: &MemoryUserStore, hasher: &H) {
    for (tenant, role, email) in [
        (1, AccessRole::SuperAdmin, "root@x.com"),
        (5, AccessRole::TenantAdmin, "john@x.com"),
        (5, AccessRole::StandardUser, "jane@x.com"),
        (6, AccessRole::StandardUser, "bob@x.com"),
    ] {
        let hash = hasher.hash("rightpass").unwrap();
        store.create(User::new(TenantId(tenant), role, email, hash)).unwrap();
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[test]
fn login_then_authorize_request() {
    let store = MemoryUserStore::new();
    seed(&store, &FastHasher);
    let tokens = token_service();
    let auth = AuthService::new(store, &tokens, FastHasher);

    let login = auth.authenticate("john@x.com", "rightpass").unwrap();
    let identity = tokens.authenticate_header(&bearer(&login.token)).unwrap();

    assert_eq!(identity.user_id(), UserId(2));
    assert_eq!(identity.tenant_id(), TenantId(5));
    assert_eq!(identity.email(), "john@x.com");
    assert_eq!(identity.role(), AccessRole::TenantAdmin);

    let rbac = RbacEnforcer::new();
    assert!(rbac.enforce_tenant(&identity, TenantId(5)).is_ok());
    assert!(matches!(
        rbac.enforce_tenant(&identity, TenantId(6)),
        Err(AuthError::Forbidden)
    ));
    assert_eq!(
        derive_list_scope(&identity).unwrap(),
        ListScope::Tenant(TenantId(5))
    );
}

#[test]
fn wrong_password_is_invalid_credentials_with_argon2() {
    let store = MemoryUserStore::new();
    seed(&store, &Argon2Hasher::new());
    let auth = AuthService::new(store, token_service(), Argon2Hasher::new());

    let result = auth.authenticate("john@x.com", "wrongpass");
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    assert_eq!(result.unwrap_err().status_code(), 401);

    assert!(auth.authenticate("john@x.com", "rightpass").is_ok());
}

#[test]
fn inactive_account_cannot_log_in() {
    let store = MemoryUserStore::new();
    seed(&store, &FastHasher);
    let mut jane = store.find_by_email("jane@x.com").unwrap().unwrap();
    jane.active = false;
    store.update(&jane).unwrap();

    let auth = AuthService::new(store, token_service(), FastHasher);
    let result = auth.authenticate("jane@x.com", "rightpass");
    assert!(matches!(result, Err(AuthError::InactiveAccount)));
}

#[test]
fn refresh_reflects_current_role_and_rotates_on_login() {
    let store = MemoryUserStore::new();
    seed(&store, &FastHasher);
    let tokens = token_service();
    let auth = AuthService::new(store.clone(), &tokens, FastHasher);

    let first = auth.authenticate("jane@x.com", "rightpass").unwrap();

    let mut jane = store.view(UserId(3)).unwrap();
    jane.role = AccessRole::TenantAdmin;
    store.update(&jane).unwrap();

    let refreshed = auth.refresh(&first.refresh_token).unwrap();
    let claims = tokens.parse_token(&bearer(&refreshed.token)).unwrap();
    assert_eq!(claims.role, AccessRole::TenantAdmin);

    let second = auth.authenticate("jane@x.com", "rightpass").unwrap();
    assert_ne!(first.refresh_token, second.refresh_token);
    assert!(matches!(
        auth.refresh(&first.refresh_token),
        Err(AuthError::NotFound)
    ));
}

#[test]
fn unknown_refresh_token_is_not_found() {
    let store = MemoryUserStore::new();
    seed(&store, &FastHasher);
    let auth = AuthService::new(store, token_service(), FastHasher);

    let err = auth.refresh("0123456789abcdef").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status_code(), 404);
}

#[test]
fn expired_token_is_rejected() {
    let config = JwtConfig::new(SECRET).with_duration(Duration::from_secs(1));
    let tokens = TokenService::new(config).unwrap();
    let store = MemoryUserStore::new();
    seed(&store, &FastHasher);
    let user = store.view(UserId(1)).unwrap();

    let issued = tokens.generate_token(&user.identity()).unwrap();
    std::thread::sleep(Duration::from_millis(2100));

    let result = tokens.parse_token(&bearer(&issued.token));
    assert!(matches!(result, Err(AuthError::Expired)));
}

#[test]
fn token_from_other_deployment_is_rejected() {
    let ours = token_service();
    let other_secret = JwtConfig::new("a-completely-different-secret-of-32b+");
    let theirs = TokenService::new(other_secret).unwrap();
    let store = MemoryUserStore::new();
    seed(&store, &FastHasher);
    let user = store.view(UserId(1)).unwrap();

    let issued = theirs.generate_token(&user.identity()).unwrap();
    let err = ours.authenticate_header(&bearer(&issued.token)).unwrap_err();
    assert!(matches!(err, AuthError::InvalidSignature));
    assert_eq!(ours.challenge(), "JWT realm=\"shelters\"");
}

#[test]
fn me_returns_caller_record() {
    let store = MemoryUserStore::new();
    seed(&store, &FastHasher);
    let tokens = token_service();
    let auth = AuthService::new(store, &tokens, FastHasher);

    let login = auth.authenticate("bob@x.com", "rightpass").unwrap();
    let identity = tokens.authenticate_header(&bearer(&login.token)).unwrap();
    let me = auth.me(&identity).unwrap();

    assert_eq!(me.email, "bob@x.com");
    assert_eq!(me.tenant_id, TenantId(6));
    assert!(me.last_login.is_some());
}

#[test]
fn user_management_respects_hierarchy() {
    let store = MemoryUserStore::new();
    seed(&store, &FastHasher);
    let users = UserService::new(store.clone(), RbacEnforcer::new(), FastHasher);
    let owner = store.view(UserId(2)).unwrap().identity();
    let adopter = store.view(UserId(3)).unwrap().identity();

    let created = users
        .create(
            &owner,
            NewUser {
                first_name: "Sam".to_string(),
                last_name: "Lee".to_string(),
                email: "sam@x.com".to_string(),
                password: "volunteer1".to_string(),
                password_confirm: "volunteer1".to_string(),
                tenant_id: TenantId(5),
                role: AccessRole::StandardUser,
                mobile: None,
                phone: None,
                address: None,
            },
        )
        .unwrap();
    assert_eq!(created.id, UserId(5));

    let listed = users.list(&owner, &Pagination::new(10, 0).unwrap()).unwrap();
    assert!(listed.iter().all(|user| user.tenant_id == TenantId(5)));
    assert_eq!(listed.len(), 3);

    assert!(matches!(
        users.list(&adopter, &Pagination::default()),
        Err(AuthError::Forbidden)
    ));

    users.delete(&owner, created.id).unwrap();
    assert!(matches!(
        users.view(&owner, created.id),
        Err(AuthError::Forbidden)
    ));
    let root = store.view(UserId(1)).unwrap().identity();
    assert!(matches!(
        users.view(&root, created.id),
        Err(AuthError::NotFound)
    ));
}

#[test]
fn config_builder_feeds_token_service() {
    let config = ConfigBuilder::new()
        .secret(SECRET.to_string())
        .realm("shelters".to_string())
        .token_duration(Duration::from_secs(600))
        .build()
        .unwrap();

    let tokens = TokenService::new(config.jwt).unwrap();
    assert_eq!(tokens.config().duration, Duration::from_secs(600));
    assert_eq!(tokens.challenge(), "JWT realm=\"shelters\"");
}
