#[actix_web::main]
async fn main() -> std::io::Result<()> {
    contract_doc_server::run().await
}
