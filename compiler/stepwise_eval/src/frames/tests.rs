use super::*;
use crate::environment::{LocalScope, Scope};
use pretty_assertions::assert_eq;

fn activation(pc: u32, name: Option<&str>) -> Activation {
    Activation {
        pc: NodeId::new(pc),
        scope: LocalScope::new(Scope::new()),
        name: name.map(str::to_owned),
    }
}

#[test]
fn capture_is_innermost_first() {
    let mut stack = CallStack::new(10);
    stack.push(activation(1, None)).unwrap();
    stack.push(activation(2, Some("outer"))).unwrap();
    stack.push(activation(3, Some("inner"))).unwrap();
    let chain = stack.capture();
    chain.validate().unwrap();
    let pcs: Vec<u32> = chain.walk().map(|f| f.pc.raw()).collect();
    assert_eq!(pcs, vec![3, 2, 1]);
    assert_eq!(chain.top().and_then(|f| f.name.as_deref()), Some("inner"));
    assert_eq!(chain.get(2).map(|f| f.parent), Some(None));
}

#[test]
fn depth_limit() {
    let mut stack = CallStack::new(2);
    stack.push(activation(0, None)).unwrap();
    stack.push(activation(0, None)).unwrap();
    assert_eq!(stack.push(activation(0, None)), Err(StackOverflow));
    assert_eq!(stack.depth(), 2);
}

#[test]
fn empty_chain_is_invalid() {
    assert_eq!(FrameChain::default().validate(), Err(FrameChainError::Empty));
    assert_eq!(FrameChain::default().walk().count(), 0);
}

#[test]
fn backward_parent_link_is_invalid() {
    let mut frames = CallStack::new(4);
    frames.push(activation(0, None)).unwrap();
    frames.push(activation(1, None)).unwrap();
    let mut raw: Vec<Frame> = frames.capture().walk().cloned().collect();
    raw[1].parent = Some(0);
    let err = FrameChain::from_frames(raw).validate().unwrap_err();
    assert_eq!(
        err,
        FrameChainError::BadParent {
            index: 1,
            parent: 0,
            len: 2
        }
    );
    assert_eq!(
        err.to_string(),
        "frame 1 links to parent 0 in a chain of 2"
    );
}
