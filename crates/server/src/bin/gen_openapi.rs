use server::openapi::ApiDoc;
use utoipa::OpenApi;

/// Print the OpenAPI document as pretty JSON.
fn main() -> Result<(), serde_json::Error> {
    let doc = ApiDoc::openapi().to_pretty_json()?;
    println!("{doc}");
    Ok(())
}
