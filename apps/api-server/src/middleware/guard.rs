//! Route guard - cookie-presence gating with redirects.
//!
//! Runs once per request with no retained state. This is a fast, approximate
//! filter: it checks only that the session cookie *exists*, never that it is
//! valid. True authorization happens again behind it, in the [`Identity`]
//! extractor and the lifecycle manager's session gate - intentional
//! defense-in-depth, not redundancy.
//!
//! [`Identity`]: super::auth::Identity

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpResponse};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use super::auth::SESSION_COOKIE;

/// Path prefixes that require a session cookie.
const PROTECTED_PREFIXES: [&str; 3] = ["/profile", "/post/create", "/post/edit"];

/// The sign-in page; sends signed-in visitors back home.
const LOGIN_PATH: &str = "/auth";

const HOME_PATH: &str = "/";

/// What the guard decided for one request.
#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    Pass,
    Redirect(&'static str),
}

/// Classify a request path against the cookie presence flag.
pub fn decide(path: &str, has_session_cookie: bool) -> Decision {
    let protected = PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix));

    if protected && !has_session_cookie {
        return Decision::Redirect(LOGIN_PATH);
    }
    if path == LOGIN_PATH && has_session_cookie {
        return Decision::Redirect(HOME_PATH);
    }
    Decision::Pass
}

/// Actix middleware applying [`decide`] to every incoming request.
pub struct RouteGuard;

impl<S, B> Transform<S, ServiceRequest> for RouteGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RouteGuardMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteGuardMiddleware { service }))
    }
}

pub struct RouteGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RouteGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let has_cookie = req.cookie(SESSION_COOKIE).is_some();

        match decide(req.path(), has_cookie) {
            Decision::Redirect(target) => {
                tracing::debug!(path = req.path(), target, "route guard redirect");
                let (req, _) = req.into_parts();
                let response = HttpResponse::Found()
                    .insert_header((header::LOCATION, target))
                    .finish()
                    .map_into_right_body();
                Box::pin(async move { Ok(ServiceResponse::new(req, response)) })
            }
            Decision::Pass => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
        }
    }
}
