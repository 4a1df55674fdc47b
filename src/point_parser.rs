//! Parsers for points given on the command line, `x,y` pairs separated
//! by white space.

use crate::coords::Point;
use crate::error::PathError;
use nom::Finish;

mod parser {
    use std::str::FromStr;
    use crate::coords::Point;
    use nom::IResult;
    use nom::branch::alt;
    use nom::character::complete::{char, digit0, digit1, multispace0, multispace1, one_of};
    use nom::combinator::{all_consuming, map, map_res, opt, recognize};
    use nom::multi::separated_list0;
    use nom::sequence::{delimited, pair, separated_pair, tuple};

    type Input<'a> = &'a str;

    fn sign_opt(i: Input) -> IResult<Input, Option<char>> {
        opt(one_of("+-"))(i)
    }

    fn fractional_constant(i: Input) -> IResult<Input, Input> {
        alt((recognize(tuple((digit0, char('.'), digit1))),
             recognize(pair(digit1, char('.')))))(i)
    }

    fn exponent(i: Input) -> IResult<Input, Input> {
        recognize(tuple((one_of("eE"), sign_opt, digit1)))(i)
    }

    pub fn number(i: Input) -> IResult<Input, f64> {
        map_res(recognize(pair(sign_opt,
                               alt((recognize(pair(fractional_constant, opt(exponent))),
                                    recognize(pair(digit1, opt(exponent))))))),
                f64::from_str)(i)
    }

    fn comma(i: Input) -> IResult<Input, char> {
        delimited(multispace0, char(','), multispace0)(i)
    }

    pub fn point(i: Input) -> IResult<Input, Point> {
        map(separated_pair(number, comma, number), |(x, y)| Point{x, y})(i)
    }

    pub fn single_point(i: Input) -> IResult<Input, Point> {
        all_consuming(delimited(multispace0, point, multispace0))(i)
    }

    pub fn point_list(i: Input) -> IResult<Input, Vec<Point>> {
        all_consuming(delimited(multispace0,
                                separated_list0(multispace1, point),
                                multispace0))(i)
    }
}

fn syntax_error(e: nom::error::Error<&str>) -> PathError
{
    if e.input.is_empty() {
        PathError::Syntax("end of input".to_string())
    } else {
        PathError::Syntax(e.input.to_string())
    }
}

/// Parses a single `x,y` point
pub fn parse_point(s: &str) -> Result<Point, PathError>
{
    parser::single_point(s).finish().map(|(_, p)| p).map_err(syntax_error)
}

/// Parses a white space separated list of `x,y` points
pub fn parse_points(s: &str) -> Result<Vec<Point>, PathError>
{
    parser::point_list(s).finish().map(|(_, p)| p).map_err(syntax_error)
}

#[test]
fn test_number()
{
    assert_eq!(parser::number("12"), Ok(("", 12.0)));
    assert_eq!(parser::number("-1.5,"), Ok((",", -1.5)));
    assert_eq!(parser::number("+.25"), Ok(("", 0.25)));
    assert_eq!(parser::number("3."), Ok(("", 3.0)));
    assert_eq!(parser::number("1e3"), Ok(("", 1000.0)));
    assert_eq!(parser::number("2.5E-1"), Ok(("", 0.25)));
    assert!(parser::number("x").is_err());
}

#[test]
fn test_parse_point()
{
    assert_eq!(parse_point("50,10").unwrap(), Point::new(50.0, 10.0));
    assert_eq!(parse_point(" -3.5 , 4e1 ").unwrap(), Point::new(-3.5, 40.0));
    match parse_point("50") {
        Err(PathError::Syntax(_)) => {},
        r => panic!("Unexpected result: {:?}", r)
    }
    assert!(parse_point("1,2 3,4").is_err());
}

#[test]
fn test_parse_points()
{
    assert_eq!(parse_points("0,0 100,0\n100,50").unwrap(),
               vec![Point::new(0.0, 0.0),
                    Point::new(100.0, 0.0),
                    Point::new(100.0, 50.0)]);
    assert_eq!(parse_points("  ").unwrap(), vec![]);
    match parse_points("0,0 1;2") {
        Err(PathError::Syntax(rest)) => assert_eq!(rest, "1;2"),
        r => panic!("Unexpected result: {:?}", r)
    }
}
