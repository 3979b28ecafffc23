use oxc::{
  allocator::{self, Allocator, Box, CloneIn, Dummy},
  ast::{
    AstBuilder,
    ast::{
      self, Argument, Directive, Expression, JSXAttributeItem, JSXAttributeName,
      JSXAttributeValue, JSXChild, JSXElementName, JSXExpression, JSXMemberExpressionObject,
      Program, Statement,
    },
  },
  span::{Atom, SPAN, SourceType, Span},
};

// `AstBuilder` is more suitable name, but it's already used in oxc.
pub struct AstSnippet<'ast> {
  pub builder: AstBuilder<'ast>,
}

impl<'ast> AstSnippet<'ast> {
  pub fn new(alloc: &'ast Allocator) -> Self {
    Self { builder: AstBuilder::new(alloc) }
  }

  #[inline]
  pub fn alloc(&self) -> &'ast Allocator {
    self.builder.allocator
  }

  pub fn atom(&self, value: &str) -> Atom<'ast> {
    self.builder.atom(value)
  }

  /// `"value"` as a call argument. The raw text is dropped so the printer quotes the new value.
  pub fn string_literal_argument(&self, value: &str, span: Span) -> Argument<'ast> {
    Argument::StringLiteral(self.builder.alloc_string_literal(span, self.atom(value), None))
  }

  /// An expression statement holding nothing but a string, used to mark removed code.
  pub fn marker_statement(&self, text: &str, span: Span) -> Statement<'ast> {
    self.builder.statement_expression(
      span,
      self.builder.expression_string_literal(span, self.atom(text), None),
    )
  }

  pub fn program(
    &self,
    directives: allocator::Vec<'ast, Directive<'ast>>,
    body: allocator::Vec<'ast, Statement<'ast>>,
  ) -> Program<'ast> {
    Program {
      span: SPAN,
      source_type: SourceType::cjs(),
      source_text: "",
      directives,
      body,
      ..Program::dummy(self.alloc())
    }
  }

  pub fn jsx_name(&self, name: &str, span: Span) -> JSXElementName<'ast> {
    JSXElementName::Identifier(self.builder.alloc_jsx_identifier(span, self.atom(name)))
  }

  /// `a.b.c` as an element name. `path` must have at least two segments.
  pub fn jsx_member_name(&self, path: &[&str], span: Span) -> Option<JSXElementName<'ast>> {
    let [object, properties @ ..] = path else {
      return None;
    };
    let (last, middle) = properties.split_last()?;
    let mut object = JSXMemberExpressionObject::IdentifierReference(
      self.builder.alloc_identifier_reference(span, self.atom(object)),
    );
    for property in middle {
      let property = self.builder.jsx_identifier(span, self.atom(property));
      object = JSXMemberExpressionObject::MemberExpression(
        self.builder.alloc_jsx_member_expression(span, object, property),
      );
    }
    let property = self.builder.jsx_identifier(span, self.atom(last));
    Some(JSXElementName::MemberExpression(
      self.builder.alloc_jsx_member_expression(span, object, property),
    ))
  }

  /// `name="value"` for string literals, `name={value}` for everything else. Strings JSX cannot
  /// spell without escapes stay in braces.
  pub fn jsx_attribute(
    &self,
    name: &str,
    value: Expression<'ast>,
    span: Span,
  ) -> JSXAttributeItem<'ast> {
    let name =
      JSXAttributeName::Identifier(self.builder.alloc_jsx_identifier(span, self.atom(name)));
    let value = match value {
      Expression::StringLiteral(lit) if is_plain_jsx_string(&lit.value) => {
        JSXAttributeValue::StringLiteral(lit)
      }
      value => JSXAttributeValue::ExpressionContainer(
        self.builder.alloc_jsx_expression_container(span, JSXExpression::from(value)),
      ),
    };
    JSXAttributeItem::Attribute(self.builder.alloc_jsx_attribute(span, name, Some(value)))
  }

  /// `{...argument}` among the attributes.
  pub fn jsx_spread_attribute(
    &self,
    argument: Expression<'ast>,
    span: Span,
  ) -> JSXAttributeItem<'ast> {
    JSXAttributeItem::SpreadAttribute(self.builder.alloc_jsx_spread_attribute(span, argument))
  }

  /// `{...children}` among the children.
  pub fn jsx_spread_child(&self, expression: Expression<'ast>, span: Span) -> JSXChild<'ast> {
    JSXChild::Spread(self.builder.alloc_jsx_spread_child(span, expression))
  }

  /// Elements and fragments are kept as they are, anything else goes into `{...}`.
  pub fn jsx_child(&self, child: Expression<'ast>) -> JSXChild<'ast> {
    match child {
      Expression::JSXElement(element) => JSXChild::Element(element),
      Expression::JSXFragment(fragment) => JSXChild::Fragment(fragment),
      child => {
        let span = oxc::span::GetSpan::span(&child);
        JSXChild::ExpressionContainer(
          self.builder.alloc_jsx_expression_container(span, JSXExpression::from(child)),
        )
      }
    }
  }

  /// An element that is self-closing when `children` is empty, otherwise closed by a matching tag.
  pub fn jsx_element(
    &self,
    name: JSXElementName<'ast>,
    attributes: allocator::Vec<'ast, JSXAttributeItem<'ast>>,
    children: allocator::Vec<'ast, JSXChild<'ast>>,
    span: Span,
  ) -> Box<'ast, ast::JSXElement<'ast>> {
    let closing_element = if children.is_empty() {
      None
    } else {
      Some(self.builder.alloc_jsx_closing_element(span, name.clone_in(self.alloc())))
    };
    let opening_element = self.builder.alloc(ast::JSXOpeningElement {
      span,
      name,
      attributes,
      ..ast::JSXOpeningElement::dummy(self.alloc())
    });
    self.builder.alloc(ast::JSXElement {
      span,
      opening_element,
      children,
      closing_element,
      ..ast::JSXElement::dummy(self.alloc())
    })
  }
}

fn is_plain_jsx_string(value: &str) -> bool {
  !value.contains(['\\', '\n']) && !(value.contains('"') && value.contains('\''))
}
