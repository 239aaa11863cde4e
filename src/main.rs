use api_tester::error::AppResult;

fn main() -> AppResult<()> {
    api_tester::entry::run()
}
