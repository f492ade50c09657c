use log::info;
use reqwest::header::CONTENT_TYPE;
use serde_json::json;

use crate::libs::constants::{MEDIA_BUCKET, PLAYLIST_TABLE};
use crate::libs::error::{AnyResult, MedleyError};
use crate::libs::media::{MediaRecord, NewMediaRecord};

/**
 * Thin client over the two Supabase surfaces this app uses: the PostgREST
 * endpoint for the playlist table and the Storage endpoint for the media
 * bucket. The anon key is sent both as `apikey` and as a bearer token,
 * which is what the official JS client does.
 *
 * Cloning is cheap, `reqwest::Client` is internally reference counted.
 */
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /**
     * Build a client from the resolved credentials. This is the only place
     * that validates them, missing values surface as a typed error rather
     * than a panic so the frontend can show a configuration screen.
     */
    pub fn new(url: &str, anon_key: &str) -> AnyResult<Self> {
        if url.trim().is_empty() {
            return Err(MedleyError::NotConfigured);
        }
        if anon_key.trim().is_empty() {
            return Err(MedleyError::NotConfigured);
        }

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: url.trim().trim_end_matches('/').to_string(),
            anon_key: anon_key.trim().to_string(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, PLAYLIST_TABLE)
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, MEDIA_BUCKET, key)
    }

    /**
     * Service-issued address from which the media element can fetch the
     * object directly. Keys are sanitized at upload time, so they can be
     * embedded without escaping.
     */
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, MEDIA_BUCKET, key
        )
    }

    /**
     * Turn a non-2xx response into a MedleyError carrying the status and
     * whatever the service put in the body.
     */
    async fn check(response: reqwest::Response) -> AnyResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(MedleyError::Supabase(format!("{}: {}", status, body)))
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /**
     * Fetch all records, newest first
     */
    pub async fn fetch_records(&self) -> AnyResult<Vec<MediaRecord>> {
        let response = self
            .authed(self.http.get(self.table_url()))
            .query(&[
                ("select", "id,name,url,type,path,uploaded_at"),
                ("order", "uploaded_at.desc"),
            ])
            .send()
            .await?;

        let records = Self::check(response).await?.json().await?;
        Ok(records)
    }

    /**
     * Insert one row and return it as stored (id and uploaded_at are
     * assigned by the backend)
     */
    pub async fn insert_record(&self, record: &NewMediaRecord) -> AnyResult<MediaRecord> {
        let response = self
            .authed(self.http.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;

        let mut rows: Vec<MediaRecord> = Self::check(response).await?.json().await?;
        rows.pop().ok_or(MedleyError::RecordNotFound)
    }

    pub async fn delete_record(&self, id: i64) -> AnyResult<()> {
        let response = self
            .authed(self.http.delete(self.table_url()))
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /**
     * Upload raw bytes to the bucket under the given key
     */
    pub async fn upload_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AnyResult<()> {
        info!("Uploading {} byte(s) to {:?}", bytes.len(), key);

        let response = self
            .authed(self.http.post(self.object_url(key)))
            .header(CONTENT_TYPE, content_type.to_string())
            .body(bytes)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /**
     * Remove one stored object. Mirrors the JS client's `remove([key])`,
     * which issues a DELETE on the bucket with the keys in the body.
     */
    pub async fn remove_object(&self, key: &str) -> AnyResult<()> {
        let response = self
            .authed(
                self.http
                    .delete(format!("{}/storage/v1/object/{}", self.base_url, MEDIA_BUCKET)),
            )
            .json(&json!({ "prefixes": [key] }))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseClient {
        SupabaseClient::new("https://example.supabase.co/", "anon-key").unwrap()
    }

    #[test]
    fn test_new_rejects_missing_credentials() {
        assert!(matches!(
            SupabaseClient::new("", "anon-key"),
            Err(MedleyError::NotConfigured)
        ));
        assert!(matches!(
            SupabaseClient::new("https://example.supabase.co", "  "),
            Err(MedleyError::NotConfigured)
        ));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = client();
        assert_eq!(
            client.table_url(),
            "https://example.supabase.co/rest/v1/playlist"
        );
    }

    #[test]
    fn test_object_and_public_urls() {
        let client = client();
        let key = "uploads/1700000000000-song.mp3";
        assert_eq!(
            client.object_url(key),
            "https://example.supabase.co/storage/v1/object/media/uploads/1700000000000-song.mp3"
        );
        assert_eq!(
            client.public_url(key),
            "https://example.supabase.co/storage/v1/object/public/media/uploads/1700000000000-song.mp3"
        );
    }
}
