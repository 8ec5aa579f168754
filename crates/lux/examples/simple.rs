//! Serves one event read from stdin and prints the response event.
//!
//! echo '{"httpMethod":"GET","headers":{}}' | cargo run --example simple

use http::{Method, StatusCode};
use lux::{
    handler_fn, middleware_fn, new_response, recovery_fn, EncodeError, LogFormat, LoggingConfig, Rejection, Request,
    RequestContext, Response, RouteError, Router,
};
use std::error::Error;
use std::io::{self, Read};
use tracing::error;

fn get_handler() -> Result<Response, EncodeError> {
    new_response("hello GET request", StatusCode::OK)
}

fn post_handler() -> Result<Response, EncodeError> {
    new_response("hello POST request", StatusCode::OK)
}

fn put_handler() -> Result<Response, EncodeError> {
    new_response("hello PUT request", StatusCode::OK)
}

fn delete_handler(method: &Method) -> Result<Response, EncodeError> {
    new_response(&format!("hello {method} request"), StatusCode::OK)
}

fn inspect(req: &mut RequestContext<'_>) -> Result<(), Rejection> {
    tracing::info!(headers = req.headers().len(), "inspecting request");
    Ok(())
}

fn on_panic(req: &Request, err: &RouteError) {
    error!(method = %req.method(), "recovered from panic, {err}");
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut router = Router::new();
    router.recovery(recovery_fn(on_panic));
    router.logging(io::stderr, &LoggingConfig::from_env()?.with_format(LogFormat::Json))?;

    router.get(handler_fn(get_handler));
    router.put(handler_fn(put_handler));
    router.post(handler_fn(post_handler));
    router.delete(handler_fn(delete_handler));

    router.middleware(middleware_fn(inspect));

    let mut event = String::new();
    io::stdin().read_to_string(&mut event)?;

    let request = Request::from_json(&event)?;
    let response = router.handle_request(&request);

    println!("{}", response.to_json()?);
    Ok(())
}
