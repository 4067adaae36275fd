use pretty_assertions::assert_eq;

use super::*;

fn printf(text: &str) -> Node {
	SimpleCmd::new("printf").arg(text).into()
}

fn cat_into(path: &Path) -> Node {
	SimpleCmd::new("cat").stdout(path_word(path), false).into()
}

#[test]
fn output_flows_to_reader() {
	let dir = scratch();
	let out = scratch_file(&dir, "out");

	assert_eq!(run(&Node::pipe(printf("hello\n"), cat_into(&out))), Status::Code(0));
	assert_eq!(read(&out), "hello\n");
}

#[test]
fn status_is_the_readers() {
	assert_eq!(run(&Node::pipe(exits(0), exits(3))), Status::Code(3));
	assert_eq!(run(&Node::pipe(exits(4), sh("cat >/dev/null").into())), Status::Code(0));
}

#[test]
fn reader_sees_eof() {
	let dir = scratch();
	let out = scratch_file(&dir, "out");
	let count = sh("wc -l | tr -d ' '").stdout(path_word(&out), false);

	let status = run(&Node::pipe(printf("a\nb\nc\n"), count.into()));
	assert_eq!(status, Status::Code(0));
	assert_eq!(read(&out), "3\n");
}

#[test]
fn large_output_does_not_stall() {
	let dir = scratch();
	let out = scratch_file(&dir, "out");
	let count = sh("wc -l | tr -d ' '").stdout(path_word(&out), false);

	let status = run(&Node::pipe(sh("seq 1 100000").into(), count.into()));
	assert_eq!(status, Status::Code(0));
	assert_eq!(read(&out), "100000\n");
}

#[test]
fn early_reader_exit_ends_writer() {
	// The writer only stops once nobody holds the read end anymore
	let status = run(&Node::pipe(sh("yes").into(), sh("head -n 1 >/dev/null").into()));
	assert_eq!(status, Status::Code(0));
}

#[test]
fn chained_pipes() {
	let dir = scratch();
	let out = scratch_file(&dir, "out");
	let sort: Node = SimpleCmd::new("sort").into();

	// (a | b) | c
	let left_nested = Node::pipe(Node::pipe(printf("b\na\n"), sort.clone()), cat_into(&out));
	assert_eq!(run(&left_nested), Status::Code(0));
	assert_eq!(read(&out), "a\nb\n");

	// a | (b | c)
	let right_nested = Node::pipe(printf("d\nc\n"), Node::pipe(sort, cat_into(&out)));
	assert_eq!(run(&right_nested), Status::Code(0));
	assert_eq!(read(&out), "c\nd\n");
}

#[test]
fn sequence_on_the_writer_side() {
	let dir = scratch();
	let out = scratch_file(&dir, "out");
	let writer = Node::seq(printf("one "), printf("two"));

	assert_eq!(run(&Node::pipe(writer, cat_into(&out))), Status::Code(0));
	assert_eq!(read(&out), "one two");
}

#[test]
fn redirect_beats_pipe() {
	// An explicit stdout target wins over the pipe, so the reader gets nothing
	let dir = scratch();
	let file = scratch_file(&dir, "file");
	let out = scratch_file(&dir, "out");
	let writer = SimpleCmd::new("printf").arg("to file").stdout(path_word(&file), false);

	assert_eq!(run(&Node::pipe(writer.into(), cat_into(&out))), Status::Code(0));
	assert_eq!(read(&file), "to file");
	assert_eq!(read(&out), "");
}

#[test]
fn exit_on_the_writer_side() {
	let dir = scratch();
	let out = scratch_file(&dir, "out");
	let writer = Node::seq(SimpleCmd::new("exit").into(), printf("unreachable"));

	assert_eq!(run(&Node::pipe(writer, cat_into(&out))), Status::Code(0));
	assert_eq!(read(&out), "");
}
