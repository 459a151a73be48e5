fn main() {
    urispec::cli::run();
}
