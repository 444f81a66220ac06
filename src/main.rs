// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! cool-http CLI
//!
//! Sends one call through the orchestrator and prints the outcome.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use reqwest::Method;

use cool_http::{
    Body, ClientConfig, HttpOrchestrator, ReqwestTransport, RequestLogger, RequestOptions,
    SharedCookieString,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "cool_http=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None | Some("--help" | "-h" | "help") => {
            print_usage();
            if args.is_empty() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Some("--version" | "-v" | "version") => {
            println!("cool-http {}", cool_http::VERSION);
            ExitCode::SUCCESS
        }
        Some(_) => match parse_invocation(&args) {
            Ok(invocation) => run(invocation).await,
            Err(e) => {
                eprintln!("{:#}", e);
                print_usage();
                ExitCode::from(1)
            }
        },
    }
}

fn print_usage() {
    println!(
        r#"cool-http - HTTP orchestration layer

USAGE:
    cool-http <METHOD> <url> [body] [OPTIONS]

METHODS:
    get, head, delete       No body
    post, put, patch        Optional body (JSON if it parses, text otherwise)

OPTIONS:
    --base-url <url>                Prefix for the request URL
    --header <name:value>           Global header (repeatable)
    --cookie <raw>                  Raw cookie string, e.g. "a=1; b=2"
    --forward-cookie <name:header>  Send a cookie value in a header (repeatable)
    --with-credentials              Send cookies with the call
    --log                           Log requests and responses

EXAMPLES:
    cool-http get users/1 --base-url https://api.example.com
    cool-http post https://api.example.com/users '{{"name":"ada"}}' --header x-tenant:acme
    cool-http get https://api.example.com/me --cookie "XSRF-TOKEN=abc" --forward-cookie XSRF-TOKEN:X-XSRF-TOKEN
"#
    );
}

struct Invocation {
    method: Method,
    url: String,
    body: Option<Body>,
    config: ClientConfig,
    cookie: Option<String>,
    log: bool,
}

fn parse_invocation(args: &[String]) -> anyhow::Result<Invocation> {
    let method = match args[0].to_ascii_lowercase().as_str() {
        "get" => Method::GET,
        "head" => Method::HEAD,
        "delete" => Method::DELETE,
        "post" => Method::POST,
        "put" => Method::PUT,
        "patch" => Method::PATCH,
        other => bail!("Unknown method: {}", other),
    };
    let takes_body = matches!(method, Method::POST | Method::PUT | Method::PATCH);

    let mut positional = Vec::new();
    let mut config = ClientConfig::new();
    let mut cookie = None;
    let mut log = false;

    let mut rest = args[1..].iter();
    while let Some(arg) = rest.next() {
        let mut value = |flag: &str| {
            rest.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a value", flag))
        };

        match arg.as_str() {
            "--base-url" => config = config.base_url(value("--base-url")?),
            "--header" => {
                let (name, val) = split_pair(&value("--header")?)?;
                config = config.global_header(name, val);
            }
            "--cookie" => cookie = Some(value("--cookie")?),
            "--forward-cookie" => {
                let (name, header) = split_pair(&value("--forward-cookie")?)?;
                config = config.forward_cookie(name, header);
            }
            "--with-credentials" => config = config.with_credentials(true),
            "--log" => log = true,
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            _ => positional.push(arg.clone()),
        }
    }

    let mut positional = positional.into_iter();
    let url = positional.next().context("Missing <url>")?;
    let body = match positional.next() {
        Some(_) if !takes_body => bail!("{} does not take a body", method),
        Some(raw) => Some(match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(json) => Body::Json(json),
            Err(_) => Body::Text(raw),
        }),
        None => None,
    };
    if positional.next().is_some() {
        bail!("Too many arguments");
    }

    Ok(Invocation {
        method,
        url,
        body,
        config,
        cookie,
        log,
    })
}

fn split_pair(raw: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .with_context(|| format!("Expected name:value, got '{}'", raw))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

async fn run(invocation: Invocation) -> ExitCode {
    let cookies = Arc::new(SharedCookieString::new(
        invocation.cookie.unwrap_or_default(),
    ));

    let transport = match ReqwestTransport::new() {
        Ok(t) => t.with_cookie_source(cookies.clone()),
        Err(e) => {
            eprintln!("Failed to create transport: {}", e);
            return ExitCode::from(1);
        }
    };

    let client = HttpOrchestrator::with_config(Arc::new(transport), invocation.config)
        .with_cookie_source(cookies);

    if invocation.log {
        let logger = Arc::new(RequestLogger {
            log_bodies: true,
            log_responses: true,
            url_filter: None,
        });
        client.register_request_interceptor(logger.clone());
        client.register_response_interceptor(logger);
    }

    match client
        .request(
            invocation.method,
            &invocation.url,
            invocation.body,
            RequestOptions::new(),
        )
        .await
    {
        Ok(Some(value)) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("Call vetoed by an interceptor");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            if let Some(http) = e.as_http() {
                if !http.body.is_empty() {
                    eprintln!("{}", http.body);
                }
            }
            ExitCode::from(1)
        }
    }
}
