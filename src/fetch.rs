use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

async fn fetch_ok(url: &str) -> anyhow::Result<web::Response> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?
        .dyn_into::<web::Response>()
        .map_err(|e| anyhow::anyhow!("fetch {}: not a Response: {:?}", url, e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    Ok(resp)
}

pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let resp = fetch_ok(url).await?;
    let promise = resp.text().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("read {}: {:?}", url, e))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("read {}: body is not text", url))
}

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let resp = fetch_ok(url).await?;
    let promise = resp.array_buffer().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let buf = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("read {}: {:?}", url, e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
