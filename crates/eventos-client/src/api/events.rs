//! Event CRUD operations for the authenticated administrator.

use reqwest::Method;
use reqwest::multipart::{Form, Part};

use super::client::{ApiClient, RequestPurpose};
use super::models::{Event, EventCreateRequest, EventUpdateRequest};
use crate::error::Result;

impl ApiClient {
    /// `GET /eventos/admin/{adminId}` - list the administrator's events.
    pub async fn list_events(&self, admin_id: i64) -> Result<Vec<Event>> {
        let builder = self.request(Method::GET, &format!("/eventos/admin/{admin_id}"))?;
        let response = self.execute(builder, RequestPurpose::Api).await?;
        Ok(response.json().await?)
    }

    /// `POST /eventos/url` - create an event whose image is referenced
    /// by URL (or left absent).
    pub async fn create_event_with_url(&self, event: &EventCreateRequest) -> Result<Event> {
        let builder = self.request(Method::POST, "/eventos/url")?.json(event);
        let response = self.execute(builder, RequestPurpose::Api).await?;
        Ok(response.json().await?)
    }

    /// `POST /eventos/upload` - create an event with an uploaded image
    /// (multipart).
    pub async fn create_event_with_upload(
        &self,
        event: &EventCreateRequest,
        file_name: &str,
        image: Vec<u8>,
    ) -> Result<Event> {
        let mut form = Form::new()
            .text("nome", event.name.clone())
            .text("data", event.date.format("%Y-%m-%dT%H:%M:%S").to_string())
            .text("localizacao", event.location.clone())
            .part("imagem", Part::bytes(image).file_name(file_name.to_owned()));
        if let Some(url) = &event.image_url {
            form = form.text("imagemUrl", url.clone());
        }

        let builder = self.request(Method::POST, "/eventos/upload")?.multipart(form);
        let response = self.execute(builder, RequestPurpose::Api).await?;
        Ok(response.json().await?)
    }

    /// `PUT /eventos/{id}` - update an event's date and location.
    pub async fn update_event(&self, id: i64, update: &EventUpdateRequest) -> Result<Event> {
        let builder = self
            .request(Method::PUT, &format!("/eventos/{id}"))?
            .json(update);
        let response = self.execute(builder, RequestPurpose::Api).await?;
        Ok(response.json().await?)
    }

    /// `DELETE /eventos/{id}` - delete an event.
    pub async fn delete_event(&self, id: i64) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("/eventos/{id}"))?;
        self.execute(builder, RequestPurpose::Api).await?;
        Ok(())
    }
}
