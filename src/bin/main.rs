fn main() {
  dcrdraft::main();
}
