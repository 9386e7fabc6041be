use lambda_runtime::Error;
use list_reader::handler::ListEnd;

#[tokio::main]
async fn main() -> Result<(), Error> {
    list_reader::runtime::serve(ListEnd::Tail).await
}
