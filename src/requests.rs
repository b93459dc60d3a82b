use anyhow::Context;
use log::debug;
use reqwest::{Client, ClientBuilder, Response, Url};
use serde::Serialize;

/// A cookie-keeping HTTP session against one booking site.
pub struct RequestClient {
    client: Client,
    base_url: Url,
}

impl RequestClient {
    pub fn new(base_url: Url) -> anyhow::Result<Self> {
        let client = ClientBuilder::new().cookie_store(true).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves site-relative paths against the base URL; absolute URLs pass through.
    pub fn resolve(&self, url: &str) -> anyhow::Result<Url> {
        self.base_url
            .join(url)
            .with_context(|| format!("could not resolve {url} against {}", self.base_url))
    }

    pub async fn fetch_url_response(&self, url: &str) -> anyhow::Result<Response> {
        let url = self.resolve(url)?;
        debug!("GET {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response)
    }

    pub async fn fetch_url_body(&self, url: &str) -> anyhow::Result<String> {
        let response = self.fetch_url_response(url).await?;
        let body = response.text().await?;
        Ok(body)
    }

    pub async fn post_form<T: Serialize + ?Sized>(
        &self,
        url: &str,
        form: &T,
    ) -> anyhow::Result<String> {
        let url = self.resolve(url)?;
        debug!("POST {url}");
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let client = RequestClient::new(Url::parse("http://bouldertour.nl").unwrap()).unwrap();
        assert_eq!(
            client.resolve("/nl/klimmen/reservations/gym-3/").unwrap().as_str(),
            "http://bouldertour.nl/nl/klimmen/reservations/gym-3/"
        );
        assert_eq!(
            client.resolve("https://example.org/slot/1").unwrap().as_str(),
            "https://example.org/slot/1"
        );
    }
}
