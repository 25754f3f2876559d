/// Mask secrets in a connection URL so it can be logged.
///
/// The password in the authority part and sensitive query parameters are
/// replaced with `***`. Strings without a `scheme://` prefix are returned as-is.
pub fn redact_connection_string(conn: &str) -> String {
    let Some(scheme_end) = conn.find("://") else {
        return conn.to_string();
    };

    let authority_start = scheme_end + 3;
    let rest = &conn[authority_start..];
    let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
    let authority = &rest[..authority_end];

    let mut redacted = String::with_capacity(conn.len());
    redacted.push_str(&conn[..authority_start]);
    match authority.rfind('@') {
        Some(at) => {
            let credentials = &authority[..at];
            match credentials.find(':') {
                Some(colon) => {
                    redacted.push_str(&credentials[..colon]);
                    redacted.push_str(":***");
                }
                None => redacted.push_str(credentials),
            }
            redacted.push_str(&authority[at..]);
        }
        None => redacted.push_str(authority),
    }

    let tail = &rest[authority_end..];
    match tail.split_once('?') {
        Some((path, query)) => {
            redacted.push_str(path);
            redacted.push('?');
            let params: Vec<String> = query
                .split('&')
                .map(|pair| match pair.split_once('=') {
                    Some((key, _)) if is_sensitive_key(key) => format!("{key}=***"),
                    _ => pair.to_string(),
                })
                .collect();
            redacted.push_str(&params.join("&"));
        }
        None => redacted.push_str(tail),
    }

    redacted
}

fn is_sensitive_key(key: &str) -> bool {
    matches!(
        key.to_ascii_lowercase().as_str(),
        "password" | "pass" | "token" | "api_key" | "apikey" | "credentials"
    )
}
