//! GSX host and path resolution.

use crate::config::{ApiMode, Region};

fn host(mode: ApiMode) -> String {
    match mode {
        ApiMode::Production => "gsxws.apple.com".to_string(),
        test => format!("gsxws{}.apple.com", test.as_str()),
    }
}

/// SOAP endpoint that requests are posted to. An override is returned verbatim.
pub fn endpoint_url(mode: ApiMode, region: Region, override_url: Option<&str>) -> String {
    if let Some(url) = override_url {
        return url.to_string();
    }
    format!("https://{}/gsx-ws/services/{}/asp", host(mode), region)
}

/// Location of the published WSDL document for a mode and region.
pub fn wsdl_url(mode: ApiMode, region: Region) -> String {
    format!(
        "https://{}/wsdl/{region}Asp/gsx-{region}Asp.wsdl",
        host(mode),
        region = region
    )
}
