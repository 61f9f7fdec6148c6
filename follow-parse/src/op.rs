//! Shift-reduce parsing of operator applications.

use crate::{Error, ErrorKind, OpNode, Range, Tok, Token, TokenKind};

/// Stack item: either an operator waiting for its closing parenthesis,
/// or a completed expression.
#[derive(Debug)]
enum Item {
    Head(Tok),
    Node(OpNode),
}

/// Parse a sequence of expressions from the tokens at the given indices.
///
/// A word directly followed by `(` starts an application,
/// which the matching `)` completes; any other word is a leaf.
/// Commas are only cosmetic.
pub(crate) fn parse(tokens: &mut [Token], idxs: &[usize], errors: &mut Vec<Error>) -> Vec<OpNode> {
    let mut stack: Vec<Item> = Vec::new();
    let mut iter = idxs.iter().copied().peekable();
    while let Some(i) = iter.next() {
        let token = &tokens[i];
        if token.is_word() {
            let tok = Tok::new(i, token);
            if iter.peek().map_or(false, |&j| tokens[j].is_sep('(')) {
                iter.next();
                stack.push(Item::Head(tok))
            } else {
                stack.push(Item::Node(OpNode::leaf(tok)))
            }
        } else if token.is_sep(')') {
            match reduce(&mut stack, token.range) {
                Some(head) => {
                    let kind = match stack.last() {
                        Some(Item::Node(node)) if node.children.is_empty() => TokenKind::ConstName,
                        _ => TokenKind::TermName,
                    };
                    tokens[head].kind = kind;
                }
                None => errors.push(Error::new(ErrorKind::UnexpectedToken, &Tok::new(i, token))),
            }
        } else if !token.is_sep(',') {
            errors.push(Error::new(ErrorKind::UnexpectedToken, &Tok::new(i, token)))
        }
    }

    let mut nodes = Vec::new();
    for item in stack {
        match item {
            Item::Node(node) => nodes.push(node),
            Item::Head(head) => errors.push(Error::new(ErrorKind::RightParenMissing, &head)),
        }
    }
    nodes
}

/// Pop all completed expressions up to the latest head,
/// and push the application of the head to them.
///
/// Return the token index of the head,
/// or `None` if there is no head (leaving the stack unchanged).
fn reduce(stack: &mut Vec<Item>, rpar: Range) -> Option<usize> {
    let pos = stack.iter().rposition(|item| matches!(item, Item::Head(_)))?;
    let children = stack
        .drain(pos + 1..)
        .filter_map(|item| match item {
            Item::Node(node) => Some(node),
            Item::Head(_) => None,
        })
        .collect();
    let head = match stack.pop() {
        Some(Item::Head(head)) => head,
        _ => return None,
    };
    let idx = head.idx;
    let range = Range::new(head.range.start, rpar.end);
    stack.push(Item::Node(OpNode {
        head,
        children,
        range,
    }));
    Some(idx)
}

#[cfg(test)]
fn ops(s: &str) -> (Vec<OpNode>, Vec<Error>) {
    let mut tokens = crate::scan(s);
    let idxs: Vec<_> = (0..tokens.len())
        .filter(|&i| tokens[i].kind != TokenKind::Ignore)
        .collect();
    let mut errors = Vec::new();
    let nodes = parse(&mut tokens, &idxs, &mut errors);
    (nodes, errors)
}

#[test]
fn nested() {
    let (nodes, errors) = ops("imp(p, neg(q)) r c()");
    assert!(errors.is_empty());
    let shown: Vec<_> = nodes.iter().map(|n| n.to_string()).collect();
    assert_eq!(shown, vec!["imp(p, neg(q))", "r", "c"]);
    assert_eq!(nodes[0].children.len(), 2);
    assert_eq!(nodes[0].range.end.offset, 14);
}

#[test]
fn unbalanced() {
    let (nodes, errors) = ops("neg(p");
    assert_eq!(nodes.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::RightParenMissing);

    let (nodes, errors) = ops("p)");
    assert_eq!(nodes.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::UnexpectedToken);
}
