// Reads one JSON command per line on stdin and answers on stdout.
fn main() {
    finlens_lib::run()
}
