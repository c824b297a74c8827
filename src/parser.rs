/*!
Scene description parser
------------------------

```ebnf
scene = SP, { statement, SP } ;
statement = margin | turn_penalty | rect ;
margin = "margin", SP, number ;
turn_penalty = "turn_penalty", SP, number ;
rect = "rect", SP, point, SP, number, SP, "x", SP, number, SP, "port", SP, point, SP, angle ;
point = "(", SP, number, SP, ",", SP, number, SP, ")" ;
angle = "left" | "up" | "top" | "right" | "down" | "bottom" | integer, "deg" ;
number = [ "-" ], digit, { digit }, [ ".", digit, { digit } ] ;
integer = [ "-" ], digit, { digit } ;
comment = "#", { ? any character except newline ? } ;
SP = { whitespace | comment } ;
```

Example:

```text
# two boxes side by side
margin 10
rect (100, 100) 50 x 50 port (125, 100) right
rect (300, 100) 50 x 50 port (275, 100) 0deg
```
*/
use crate::geometry::{Orientation, Point, Size};
use chumsky::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Margin(f32),
    TurnPenalty(f32),
    Rect {
        center: Point,
        size: Size,
        port: Point,
        angle: Angle,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
    Named(Orientation),
    Degrees(i32),
}

pub fn number() -> impl Parser<char, f32, Error = Simple<char>> + Clone {
    let frac = just('.').chain(text::digits(10));

    just('-')
        .or_not()
        .chain::<char, _, _>(text::digits(10))
        .chain::<char, _, _>(frac.or_not().flatten())
        .collect::<String>()
        .try_map(|s, span| {
            s.parse::<f32>()
                .map_err(|e| Simple::custom(span, format!("invalid number `{}`: {}", s, e)))
        })
        .labelled("number")
}

fn point() -> impl Parser<char, Point, Error = Simple<char>> + Clone {
    just('(')
        .ignore_then(number().padded())
        .then_ignore(just(','))
        .then(number().padded())
        .then_ignore(just(')'))
        .map(|(x, y)| Point::new(x, y))
        .labelled("point")
}

fn size() -> impl Parser<char, Size, Error = Simple<char>> + Clone {
    number()
        .then_ignore(just('x').padded())
        .then(number())
        .map(|(width, height)| Size::new(width, height))
        .labelled("size")
}

fn angle() -> impl Parser<char, Angle, Error = Simple<char>> + Clone {
    let named = choice((
        text::keyword("left").to(Orientation::Left),
        text::keyword("up").to(Orientation::Up),
        text::keyword("top").to(Orientation::Up),
        text::keyword("right").to(Orientation::Right),
        text::keyword("down").to(Orientation::Down),
        text::keyword("bottom").to(Orientation::Down),
    ))
    .map(Angle::Named);

    let degrees = just('-')
        .or_not()
        .chain::<char, _, _>(text::digits(10))
        .collect::<String>()
        .then_ignore(just("deg"))
        .try_map(|s, span| {
            s.parse::<i32>()
                .map_err(|e| Simple::custom(span, format!("invalid angle `{}`: {}", s, e)))
        })
        .map(Angle::Degrees);

    named.or(degrees).labelled("angle")
}

fn statement() -> impl Parser<char, Statement, Error = Simple<char>> + Clone {
    let margin = text::keyword("margin")
        .ignore_then(number().padded())
        .map(Statement::Margin);

    let turn_penalty = text::keyword("turn_penalty")
        .ignore_then(number().padded())
        .map(Statement::TurnPenalty);

    let rect = text::keyword("rect")
        .ignore_then(point().padded())
        .then(size().padded())
        .then_ignore(text::keyword("port"))
        .then(point().padded())
        .then(angle())
        .map(|(((center, size), port), angle)| Statement::Rect {
            center,
            size,
            port,
            angle,
        });

    choice((margin, turn_penalty, rect))
}

/// Parses a whole scene description into statements.
pub fn parser() -> impl Parser<char, Vec<Statement>, Error = Simple<char>> {
    let comment = just('#')
        .then(filter(|c: &char| *c != '\n').repeated())
        .ignored();
    let skip = comment
        .padded()
        .repeated()
        .then(text::whitespace())
        .ignored();

    statement()
        .padded_by(skip.clone())
        .repeated()
        .then_ignore(skip)
        .then_ignore(end())
}
